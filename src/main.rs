mod config;
mod events;
mod inventory;
mod notify;
mod scheduling;
mod sweetwater;
#[cfg(test)]
mod test_support;
mod types;
mod watcher;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::watch_config::WatchConfig;
use crate::notify::notifier::Notifier;
use crate::notify::sink_kind::SinkKind;
use crate::scheduling::schedule::Schedule;
use crate::scheduling::task_scheduler::TaskScheduler;
use crate::scheduling::types::TaskKind;
use crate::sweetwater::sweetwater_client::SweetwaterClient;
use crate::watcher::watcher::{CycleOutcome, Watcher, WatcherSettings};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// YAML watch configuration.
    #[arg(long, default_value = WatchConfig::DEFAULT_FILE_NAME)]
    pub config: PathBuf,

    #[arg(long, value_enum, default_value = "discord")]
    pub sink: SinkKind,

    /// Run a single scrape cycle after the baseline and exit.
    #[arg(long)]
    pub once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sweetwater_watch=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = WatchConfig::load(&args.config)?;

    let source =
        SweetwaterClient::from_config(&config).context("failed to create sweetwater client")?;
    let notifier = Notifier::new(args.sink.build(&config)?);

    let mut watcher = Watcher::start(
        Box::new(source),
        notifier,
        WatcherSettings::from_config(&config),
        config.refresh_interval(),
    )
    .await;

    for line in watcher.startup_summary() {
        println!("{line}");
    }

    if args.once {
        return match watcher.run_cycle().await {
            CycleOutcome::FetchFailed(error) => Err(error).context("scrape cycle failed"),
            CycleOutcome::Completed(report) => {
                info!(
                    sold = report.sold,
                    new = report.new,
                    notified = report.notified,
                    failed = report.failed_deliveries,
                    changed = report.has_changes(),
                    "single scrape cycle finished"
                );
                Ok(())
            }
        };
    }

    let mut scheduler = TaskScheduler::new();
    let now = Local::now();
    if config.post_heartbeat {
        scheduler.register(
            TaskKind::Heartbeat,
            Schedule::DailyAt(config.heartbeat_at),
            &now,
        );
    }
    scheduler.register(
        TaskKind::Scrape,
        Schedule::Every(config.refresh_interval()),
        &now,
    );

    run_until_shutdown(&mut scheduler, &mut watcher, tokio::signal::ctrl_c()).await;

    Ok(())
}

/// Runs due tasks until the scheduler is empty or `shutdown` resolves, including mid-task.
async fn run_until_shutdown<F: Future>(
    scheduler: &mut TaskScheduler<Local>,
    watcher: &mut Watcher,
    shutdown: F,
) {
    tokio::pin!(shutdown);

    loop {
        let Some(idle) = scheduler.idle_duration(&Local::now()) else {
            break;
        };

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            _ = run_due_tasks(scheduler, watcher, idle) => {}
        }
    }
}

async fn run_due_tasks(
    scheduler: &mut TaskScheduler<Local>,
    watcher: &mut Watcher,
    idle: std::time::Duration,
) {
    if !idle.is_zero() {
        tokio::time::sleep(idle).await;
    }

    for task in scheduler.take_due(&Local::now()) {
        match task {
            TaskKind::Scrape => {
                if let CycleOutcome::Completed(report) = watcher.run_cycle().await {
                    if report.aborted {
                        tracing::warn!(
                            failed = report.failed_deliveries,
                            "remaining notifications dropped after delivery failure"
                        );
                    }
                }
            }
            TaskKind::Heartbeat => watcher.heartbeat().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::TimeDelta;

    use super::*;
    use crate::config::watch_config::DeliveryPolicy;
    use crate::inventory::InventorySource;
    use crate::inventory::fetch_error::FetchError;
    use crate::notify::dry_run::DryRunSink;
    use crate::types::snapshot::InventorySnapshot;

    struct StalledSource;

    #[async_trait]
    impl InventorySource for StalledSource {
        async fn fetch(&self) -> Result<InventorySnapshot, FetchError> {
            std::future::pending().await
        }

        fn product_count(&self) -> usize {
            1
        }
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_a_running_scrape() {
        let mut watcher = Watcher::with_baseline(
            Box::new(StalledSource),
            Notifier::new(Box::new(DryRunSink)),
            WatcherSettings {
                ping_roles: vec![],
                bot_username: "SweetwaterBot".to_string(),
                delivery_policy: DeliveryPolicy::Continue,
            },
            InventorySnapshot::new(),
        );

        let mut scheduler = TaskScheduler::new();
        let an_hour_ago = Local::now() - TimeDelta::hours(1);
        scheduler.register(
            TaskKind::Scrape,
            Schedule::Every(Duration::from_secs(60)),
            &an_hour_ago,
        );

        run_until_shutdown(
            &mut scheduler,
            &mut watcher,
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;

        assert!(scheduler.idle_duration(&Local::now()).is_some());
    }
}
