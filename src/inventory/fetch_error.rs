use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch product {product_id}: {source}")]
    Transport {
        product_id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch product {product_id} ({status})")]
    Status {
        product_id: String,
        status: StatusCode,
    },
    #[error("failed to parse product JSON for {product_id}: {source}")]
    Parse {
        product_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid key access when parsing product JSON for {product_id}: {reason}")]
    Extraction { product_id: String, reason: String },
}

impl FetchError {
    pub fn product_id(&self) -> Option<&str> {
        match self {
            Self::Client(_) => None,
            Self::Transport { product_id, .. }
            | Self::Status { product_id, .. }
            | Self::Parse { product_id, .. }
            | Self::Extraction { product_id, .. } => Some(product_id),
        }
    }
}
