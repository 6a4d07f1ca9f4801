use crate::notify::DynamicSink;
use crate::notify::delivery_error::DeliveryError;
use crate::notify::notification::Notification;

/// Echoes every notification to stdout, then hands it to the sink.
pub struct Notifier {
    sink: DynamicSink,
}

impl Notifier {
    pub fn new(sink: DynamicSink) -> Self {
        Self { sink }
    }

    pub async fn notify(&self, notification: &Notification) -> Result<(), DeliveryError> {
        println!("{notification}");

        self.sink.deliver(notification).await
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}
