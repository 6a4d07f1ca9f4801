use async_trait::async_trait;
use tracing::info;

use crate::notify::NotificationSink;
use crate::notify::delivery_error::DeliveryError;
use crate::notify::notification::Notification;

/// Logs what would have been posted.
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl NotificationSink for DryRunSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        info!(
            roles = ?notification.ping_roles,
            chars = notification.content().len(),
            "dry-run: skipping webhook delivery"
        );

        Ok(())
    }
}
