//! Combines manifest lookup with existence probing.

use std::collections::BTreeSet;
use std::pin::pin;
use std::sync::Arc;

use futures::future::{self, join_all};
use futures::stream::{self, Stream, StreamExt};

use super::status::{ResolutionStatus, UnavailableReason};
use crate::asset::FormatKey;
use crate::debug;
use crate::manifest::{AssetRecord, ManifestStore};
use crate::probe::Prober;

/// Settled status of every asset of one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStatus {
    pub week: u32,
    pub assets: Vec<(FormatKey, ResolutionStatus)>,
}

impl WeekStatus {
    pub fn available_count(&self) -> usize {
        self.assets.iter().filter(|(_, s)| s.is_available()).count()
    }
}

/// Terminal status of a record whose location probed as `exists`.
fn terminal_status(record: &AssetRecord, exists: bool) -> ResolutionStatus {
    if record.is_unset() {
        ResolutionStatus::Unavailable(UnavailableReason::Unset)
    } else if exists {
        ResolutionStatus::Available(record.location.clone())
    } else {
        ResolutionStatus::Unavailable(UnavailableReason::NotFound)
    }
}

/// Turns `(week, format)` requests into [`ResolutionStatus`] sequences.
///
/// Resolutions are independent and one-shot: a changed location needs a new
/// request, nothing here watches the store.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<ManifestStore>,
    prober: Arc<Prober>,
}

impl Resolver {
    pub fn new(store: Arc<ManifestStore>, prober: Arc<Prober>) -> Self {
        Self { store, prober }
    }

    pub fn store(&self) -> &Arc<ManifestStore> {
        &self.store
    }

    /// Resolve one asset: `Verifying`, then exactly one terminal status.
    ///
    /// `Verifying` is yielded before the lookup runs, so it never waits on
    /// the probe.
    pub fn resolve(
        &self,
        week: u32,
        format: FormatKey,
    ) -> impl Stream<Item = ResolutionStatus> + Send + 'static {
        let store = Arc::clone(&self.store);
        let prober = Arc::clone(&self.prober);

        let terminal = async move {
            let record = match store.get(week, format) {
                Ok(record) => record,
                Err(e) => {
                    debug!("status"; "{}", e);
                    return ResolutionStatus::Unavailable(UnavailableReason::UnknownAsset);
                }
            };

            // Unset locations answer `false` without touching the network.
            let exists = prober.probe(&record.location).await;
            terminal_status(&record, exists)
        };

        stream::once(future::ready(ResolutionStatus::Verifying)).chain(stream::once(terminal))
    }

    /// Drive a resolution to its terminal status.
    pub async fn settle(&self, week: u32, format: FormatKey) -> ResolutionStatus {
        let mut terminal =
            pin!(self.resolve(week, format).skip_while(|s| future::ready(!s.is_terminal())));
        terminal
            .next()
            .await
            .unwrap_or(ResolutionStatus::Unavailable(UnavailableReason::UnknownAsset))
    }

    /// Settle all four assets of a week concurrently.
    pub async fn resolve_week(&self, week: u32) -> WeekStatus {
        let checks = FormatKey::ALL
            .into_iter()
            .map(|format| async move { (format, self.settle(week, format).await) });
        WeekStatus {
            week,
            assets: join_all(checks).await,
        }
    }

    /// Settle every asset of the course, weeks in course order.
    ///
    /// Works from one snapshot of the manifest. A location shared by several
    /// assets is probed once.
    pub async fn resolve_course(&self) -> Vec<WeekStatus> {
        let manifest = self.store.snapshot();
        let locations: BTreeSet<String> = manifest
            .weeks
            .iter()
            .flat_map(|w| w.assets.iter())
            .filter(|(_, record)| !record.is_unset())
            .map(|(_, record)| record.location.clone())
            .collect();
        let reachable = self.prober.probe_all(&locations).await;

        manifest
            .weeks
            .iter()
            .map(|week| WeekStatus {
                week: week.week_number,
                assets: week
                    .assets
                    .iter()
                    .map(|(format, record)| {
                        let exists = reachable.get(&record.location).copied().unwrap_or(false);
                        (format, terminal_status(record, exists))
                    })
                    .collect(),
            })
            .collect()
    }
}
