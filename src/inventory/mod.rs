pub mod fetch_error;

use async_trait::async_trait;

use crate::inventory::fetch_error::FetchError;
use crate::types::snapshot::InventorySnapshot;

#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetches everything currently listed. Any failure aborts the whole fetch.
    async fn fetch(&self) -> Result<InventorySnapshot, FetchError>;

    /// Number of upstream product identifiers this source covers.
    fn product_count(&self) -> usize;
}
