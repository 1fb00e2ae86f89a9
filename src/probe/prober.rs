//! Asset existence checks.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::join_all;
use url::Url;

use super::error::{NetError, NetResult};
use super::transport::Transport;
use crate::debug;
use crate::manifest::is_unset_location;

/// Checks whether asset locations are currently reachable.
///
/// Every failure mode (unset location, unresolvable location, transport
/// error, non-2xx status) is reported as `false`.
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn Transport>,
    base: Url,
}

impl Prober {
    /// `base` is the origin relative locations are resolved against.
    pub fn new(transport: Arc<dyn Transport>, base: Url) -> Self {
        Self { transport, base }
    }

    /// Resolve a stored location into the URL to check.
    ///
    /// Absolute URLs are used as-is, everything else is joined onto the base.
    pub fn resolve_url(&self, location: &str) -> NetResult<Url> {
        if let Ok(url) = Url::parse(location) {
            return Ok(url);
        }
        self.base
            .join(location)
            .map_err(|_| NetError::InvalidLocation {
                location: location.to_string(),
                base: self.base.to_string(),
            })
    }

    /// Check a single location.
    pub async fn probe(&self, location: &str) -> bool {
        if is_unset_location(location) {
            return false;
        }

        let url = match self.resolve_url(location) {
            Ok(url) => url,
            Err(e) => {
                debug!("probe"; "{}", e);
                return false;
            }
        };

        match self.transport.head(&url).await {
            Ok(status) => {
                debug!("probe"; "HEAD {} -> {}", url, status);
                (200..300).contains(&status)
            }
            Err(e) => {
                debug!("probe"; "could not verify {}: {}", location, e);
                false
            }
        }
    }

    /// Check many locations concurrently, keyed by input location.
    pub async fn probe_all(&self, locations: &BTreeSet<String>) -> BTreeMap<String, bool> {
        let checks = locations.iter().map(|location| async move {
            let exists = self.probe(location).await;
            (location.clone(), exists)
        });
        join_all(checks).await.into_iter().collect()
    }
}
