use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to post to discord: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to post to discord ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}
