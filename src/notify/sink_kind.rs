use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;

use crate::config::watch_config::WatchConfig;
use crate::notify::{DynamicSink, discord_webhook::DiscordWebhook, dry_run::DryRunSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    Discord,
    #[clap(name = "dry-run")]
    DryRun,
}

impl SinkKind {
    pub fn build(self, config: &WatchConfig) -> Result<DynamicSink> {
        tracing::info!(sink = %self, "creating notification sink");

        let sink: DynamicSink = match self {
            Self::Discord => {
                let webhook = DiscordWebhook::from_config(config)
                    .context("failed to create discord webhook client")?;

                if !webhook.is_enabled() {
                    tracing::warn!("discord_webhook is empty; notifications are printed only");
                }

                Box::new(webhook)
            }
            Self::DryRun => Box::new(DryRunSink),
        };

        Ok(sink)
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discord => write!(f, "discord"),
            Self::DryRun => write!(f, "dry-run"),
        }
    }
}

impl FromStr for SinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "discord" => Ok(Self::Discord),
            "dry-run" | "dryrun" => Ok(Self::DryRun),
            other => Err(anyhow!("unknown sink kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [SinkKind::Discord, SinkKind::DryRun] {
            assert_eq!(kind.to_string().parse::<SinkKind>().unwrap(), kind);
        }
        assert!("slack".parse::<SinkKind>().is_err());
    }
}
