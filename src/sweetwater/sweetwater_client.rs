use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::watch_config::WatchConfig;
use crate::inventory::InventorySource;
use crate::inventory::fetch_error::FetchError;
use crate::sweetwater::product_detail::parse_product_detail;
use crate::types::item::Item;
use crate::types::snapshot::InventorySnapshot;

#[derive(Clone, Debug)]
pub struct SweetwaterClient {
    http: reqwest::Client,
    origin: String,
    product_ids: Vec<String>,
}

impl SweetwaterClient {
    pub fn new(
        origin: impl Into<String>,
        product_ids: Vec<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            origin: origin.into().trim_end_matches('/').to_string(),
            product_ids,
        })
    }

    pub fn from_config(config: &WatchConfig) -> Result<Self, FetchError> {
        Self::new(
            config.origin(),
            config.product_ids.clone(),
            &config.user_agent,
            config.http_timeout(),
        )
    }

    pub fn detail_url(&self, product_id: &str) -> String {
        format!(
            "{}/webservices_sw/items/detail/{product_id}?format=serialcompare",
            self.origin
        )
    }

    pub async fn fetch_product(&self, product_id: &str) -> Result<Vec<Item>, FetchError> {
        let url = self.detail_url(product_id);
        debug!(%product_id, %url, "fetching product detail");

        let transport = |source: reqwest::Error| FetchError::Transport {
            product_id: product_id.to_string(),
            source,
        };

        let resp = self.http.get(&url).send().await.map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                product_id: product_id.to_string(),
                status,
            });
        }

        let text = resp.text().await.map_err(transport)?;
        let items = parse_product_detail(product_id, &self.origin, &text)?;

        debug!(%product_id, count = items.len(), "parsed product detail");

        Ok(items)
    }
}

#[async_trait]
impl InventorySource for SweetwaterClient {
    async fn fetch(&self) -> Result<InventorySnapshot, FetchError> {
        let mut snapshot = InventorySnapshot::new();

        for product_id in &self.product_ids {
            let items = self.fetch_product(product_id).await?;
            snapshot.merge(items.into_iter().collect());
        }

        info!(
            items = snapshot.len(),
            products = self.product_ids.len(),
            "fetched inventory"
        );

        Ok(snapshot)
    }

    fn product_count(&self) -> usize {
        self.product_ids.len()
    }
}
