pub mod delivery_error;
pub mod discord_webhook;
pub mod dry_run;
pub mod notification;
pub mod notifier;
pub mod sink_kind;

use async_trait::async_trait;

use crate::notify::delivery_error::DeliveryError;
use crate::notify::notification::Notification;

pub type DynamicSink = Box<dyn NotificationSink + Send + Sync>;

#[async_trait]
pub trait NotificationSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
