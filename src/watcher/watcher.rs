use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::watch_config::{DeliveryPolicy, WatchConfig};
use crate::events::ListingEvent;
use crate::inventory::InventorySource;
use crate::inventory::fetch_error::FetchError;
use crate::notify::notification::Notification;
use crate::notify::notifier::Notifier;
use crate::types::snapshot::InventorySnapshot;
use crate::watcher::change_detector::diff;

pub type DynamicSource = Box<dyn InventorySource + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Diffing,
    Notifying,
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Nothing was diffed or announced; the previous snapshot is untouched.
    FetchFailed(FetchError),
    Completed(CycleReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub sold: usize,
    pub new: usize,
    pub notified: usize,
    pub failed_deliveries: usize,
    /// Remaining notifications were dropped after a failure under [`DeliveryPolicy::Abort`].
    pub aborted: bool,
}

impl CycleReport {
    pub fn has_changes(&self) -> bool {
        self.sold > 0 || self.new > 0
    }
}

#[derive(Debug, Clone)]
pub struct WatcherSettings {
    pub ping_roles: Vec<String>,
    pub bot_username: String,
    pub delivery_policy: DeliveryPolicy,
}

impl WatcherSettings {
    pub fn from_config(config: &WatchConfig) -> Self {
        Self {
            ping_roles: config.discord_ping_roles.clone(),
            bot_username: config.bot_username.clone(),
            delivery_policy: config.delivery_policy,
        }
    }
}

/// Owns the last observed snapshot and drives one fetch, diff, notify cycle at a time.
pub struct Watcher {
    source: DynamicSource,
    notifier: Notifier,
    settings: WatcherSettings,
    previous: InventorySnapshot,
    phase: CyclePhase,
}

impl Watcher {
    pub fn with_baseline(
        source: DynamicSource,
        notifier: Notifier,
        settings: WatcherSettings,
        baseline: InventorySnapshot,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
            previous: baseline,
            phase: CyclePhase::Idle,
        }
    }

    /// Fetches the startup baseline, retrying every `retry_interval` until it succeeds.
    pub async fn start(
        source: DynamicSource,
        notifier: Notifier,
        settings: WatcherSettings,
        retry_interval: Duration,
    ) -> Self {
        let baseline = establish_baseline(source.as_ref(), retry_interval).await;

        Self::with_baseline(source, notifier, settings, baseline)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &InventorySnapshot {
        &self.previous
    }

    #[cfg(test)]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn product_count(&self) -> usize {
        self.source.product_count()
    }

    /// Header line followed by one block per baseline item.
    pub fn startup_summary(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Starting Sweetwater scrape, with {} initial products from {} product ID(s)\n",
            self.previous.len(),
            self.product_count()
        )];

        lines.extend(
            self.previous
                .iter()
                .map(|item| format!("{}\n{}\n{}\n", item.name, item.url, item.images_joined())),
        );

        lines
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.enter(CyclePhase::Fetching);

        let current = match self.source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                error!(
                    product_id = error.product_id().unwrap_or("-"),
                    %error,
                    "inventory fetch failed; keeping previous snapshot"
                );
                self.enter(CyclePhase::Idle);

                return CycleOutcome::FetchFailed(error);
            }
        };

        self.enter(CyclePhase::Diffing);

        let changes = diff(&self.previous, &current);
        self.previous = current;
        let quiet = changes.is_empty();

        let mut report = CycleReport {
            sold: changes.sold.len(),
            new: changes.new.len(),
            ..CycleReport::default()
        };

        self.enter(CyclePhase::Notifying);

        for event in changes.into_events() {
            let notification = match &event {
                ListingEvent::Sold(item) => Notification::sold(item),
                ListingEvent::Listed(item) => Notification::listed(item, &self.settings.ping_roles),
            };

            match self.notifier.notify(&notification).await {
                Ok(()) => report.notified += 1,
                Err(error) => {
                    report.failed_deliveries += 1;
                    error!(
                        serial = event.item().serial.as_u64(),
                        %error,
                        "failed to deliver notification"
                    );

                    if self.settings.delivery_policy == DeliveryPolicy::Abort {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        if quiet {
            debug!(items = self.previous.len(), "no listing changes");
        } else {
            info!(
                sold = report.sold,
                new = report.new,
                failed = report.failed_deliveries,
                "listing changes announced"
            );
        }

        self.enter(CyclePhase::Idle);

        CycleOutcome::Completed(report)
    }

    /// Delivery failures are logged and otherwise absorbed.
    pub async fn heartbeat(&self) {
        let heartbeat = Notification::heartbeat(&self.settings.bot_username);

        if let Err(error) = self.notifier.notify(&heartbeat).await {
            error!(%error, "failed to deliver heartbeat");
        }
    }

    fn enter(&mut self, phase: CyclePhase) {
        debug!(from = ?self.phase, to = ?phase, "cycle phase");
        self.phase = phase;
    }
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("items", &self.previous.len())
            .field("phase", &self.phase)
            .finish()
    }
}

async fn establish_baseline(
    source: &(dyn InventorySource + Send + Sync),
    retry_interval: Duration,
) -> InventorySnapshot {
    let mut attempt: u32 = 1;

    loop {
        match source.fetch().await {
            Ok(snapshot) => {
                if snapshot.is_empty() {
                    warn!("baseline has no serialized listings; every unit seen later is new");
                }
                return snapshot;
            }
            Err(error) => {
                error!(attempt, %error, ?retry_interval, "baseline fetch failed; retrying");
                tokio::time::sleep(retry_interval).await;
                attempt += 1;
            }
        }
    }
}
