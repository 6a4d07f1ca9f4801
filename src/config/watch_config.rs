use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};
use url::Url;

const WEBHOOK_ENV_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Browser identity sent upstream; the default reqwest one is answered with 403.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36";

/// What to do with the rest of a cycle's notifications after one delivery fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Log the failure and keep sending.
    #[default]
    Continue,
    /// Drop the remaining notifications of the cycle.
    Abort,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Upstream product identifiers to track.
    pub product_ids: Vec<String>,

    /// Discord channel webhook. Empty disables delivery.
    #[serde(default)]
    pub discord_webhook: String,

    /// Roles mentioned on new listings.
    #[serde(default = "default_ping_roles")]
    pub discord_ping_roles: Vec<String>,

    #[serde(default = "default_refresh_rate_seconds")]
    pub refresh_rate_seconds: u64,

    /// Post a liveness message once a day.
    #[serde(default = "default_post_heartbeat")]
    pub post_heartbeat: bool,

    /// Local wall-clock time of the heartbeat, "HH:MM".
    #[serde(
        default = "default_heartbeat_at",
        deserialize_with = "deserialize_clock_time"
    )]
    pub heartbeat_at: NaiveTime,

    #[serde(default = "default_bot_username")]
    pub bot_username: String,

    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,

    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub delivery_policy: DeliveryPolicy,
}

impl WatchConfig {
    pub const DEFAULT_FILE_NAME: &'static str = "sweetwater.yml";

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read watch config {}", path.display()))?;

        Self::from_yaml_str(&raw, env::var(WEBHOOK_ENV_VAR).ok())
            .with_context(|| format!("failed to load watch config {}", path.display()))
    }

    /// Parses, applies a non-blank webhook override, then validates.
    pub fn from_yaml_str(raw: &str, webhook_override: Option<String>) -> Result<Self> {
        let mut config: WatchConfig =
            serde_yaml::from_str(raw).context("failed to parse watch config")?;

        config.apply_webhook_override(webhook_override);

        config
            .validate()
            .context("watch config validation failed")?;

        Ok(config)
    }

    fn apply_webhook_override(&mut self, value: Option<String>) {
        if let Some(webhook) = value.filter(|v| !v.trim().is_empty()) {
            self.discord_webhook = webhook;
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_rate_seconds)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// `None` when delivery is disabled.
    pub fn webhook_url(&self) -> Option<&str> {
        let trimmed = self.discord_webhook.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Origin without a trailing slash, ready for concatenation with listing paths.
    pub fn origin(&self) -> &str {
        self.site_origin.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        if self.product_ids.is_empty() {
            bail!("product_ids must not be empty");
        }
        if let Some(blank) = self.product_ids.iter().position(|id| id.trim().is_empty()) {
            bail!("product_ids[{blank}] must not be blank");
        }
        if self.refresh_rate_seconds == 0 {
            bail!("refresh_rate_seconds must be > 0");
        }
        if self.http_timeout_seconds == 0 {
            bail!("http_timeout_seconds must be > 0");
        }
        if self.bot_username.trim().is_empty() {
            bail!("bot_username must not be empty");
        }
        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        let origin = Url::parse(&self.site_origin)
            .with_context(|| format!("invalid site_origin {}", self.site_origin))?;
        if !matches!(origin.scheme(), "http" | "https") {
            bail!("site_origin must be http or https, got {}", origin.scheme());
        }

        if let Some(webhook) = self.webhook_url() {
            Url::parse(webhook).context("invalid discord_webhook")?;
        }

        Ok(())
    }
}

fn default_ping_roles() -> Vec<String> {
    vec!["everyone".to_string()]
}

fn default_refresh_rate_seconds() -> u64 {
    5 * 60
}

fn default_post_heartbeat() -> bool {
    true
}

fn default_heartbeat_at() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default()
}

fn default_bot_username() -> String {
    "SweetwaterBot".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    30
}

fn default_site_origin() -> String {
    "https://www.sweetwater.com".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn deserialize_clock_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock_time(&raw).map_err(serde::de::Error::custom)
}

fn parse_clock_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("expected HH:MM, got \"{raw}\""))
}
