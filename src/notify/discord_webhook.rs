use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::watch_config::WatchConfig;
use crate::notify::NotificationSink;
use crate::notify::delivery_error::DeliveryError;
use crate::notify::notification::Notification;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: String,
    username: &'a str,
}

#[derive(Clone, Debug)]
pub struct DiscordWebhook {
    http: reqwest::Client,
    url: Option<String>,
    username: String,
}

impl DiscordWebhook {
    /// An empty `url` turns every delivery into a no-op.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;

        let url = url.into();
        let url = (!url.trim().is_empty()).then(|| url.trim().to_string());

        Ok(Self {
            http,
            url,
            username: username.into(),
        })
    }

    pub fn from_config(config: &WatchConfig) -> Result<Self, DeliveryError> {
        Self::new(
            config.webhook_url().unwrap_or_default(),
            config.bot_username.clone(),
            config.http_timeout(),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let Some(url) = &self.url else {
            debug!("discord webhook not configured; skipping delivery");
            return Ok(());
        };

        let body = WebhookMessage {
            content: notification.content(),
            username: &self.username,
        };

        let resp = self.http.post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, %body, "discord webhook rejected message");
            return Err(DeliveryError::Rejected { status, body });
        }

        debug!(%status, "discord webhook accepted message");

        Ok(())
    }
}
