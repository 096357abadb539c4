use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::api::ApiClient;
use crate::models::{Appointment, AppointmentsResponse};
use crate::store::{ReplicaStore, StoreError};

// ============================================================================
// Constants
// ============================================================================

/// Default pause before the initial fetch, in milliseconds.
/// The backend rate-limits rapid request bursts on app start; this is a
/// fixed courtesy delay, not a retry mechanism.
const PREFETCH_DELAY_MS: u64 = 250;

// ============================================================================
// Outcome types
// ============================================================================

/// Origin of a returned appointment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Just fetched from the remote API.
    Fresh,
    /// Served from the local replica after a remote failure.
    Stale,
    /// Neither the remote nor the replica yielded data.
    Unavailable,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Fresh => write!(f, "fresh"),
            Provenance::Stale => write!(f, "stale"),
            Provenance::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Result of one `refresh` call: a renderable (possibly empty) list plus
/// where it came from. Refresh never fails hard.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub appointments: Vec<Appointment>,
    pub provenance: Provenance,
}

// ============================================================================
// Seams
// ============================================================================

/// Remote fetch collaborator. The real implementation is `ApiClient`;
/// tests substitute stubs.
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    async fn fetch_appointments(&self) -> Result<AppointmentsResponse>;
}

#[async_trait]
impl AppointmentSource for ApiClient {
    async fn fetch_appointments(&self) -> Result<AppointmentsResponse> {
        ApiClient::fetch_appointments(self).await
    }
}

/// Replica collaborator, implemented by `ReplicaStore`.
#[async_trait]
pub trait AppointmentReplica: Send + Sync {
    async fn get_by_owner(&self, uid: &str) -> Result<Vec<Appointment>, StoreError>;
    async fn replace_all(&self, uid: &str, appointments: &[Appointment])
        -> Result<(), StoreError>;
}

#[async_trait]
impl AppointmentReplica for ReplicaStore {
    async fn get_by_owner(&self, uid: &str) -> Result<Vec<Appointment>, StoreError> {
        ReplicaStore::get_by_owner(self, uid).await
    }

    async fn replace_all(
        &self,
        uid: &str,
        appointments: &[Appointment],
    ) -> Result<(), StoreError> {
        ReplicaStore::replace_all(self, uid, appointments).await
    }
}

// ============================================================================
// Coordinator
// ============================================================================

/// Mediates between the remote source and the replica. Holds no state
/// between calls; every `refresh` is independent.
pub struct SyncCoordinator<S, R> {
    source: S,
    replica: R,
    prefetch_delay: Option<Duration>,
}

impl<S: AppointmentSource, R: AppointmentReplica> SyncCoordinator<S, R> {
    pub fn new(source: S, replica: R) -> Self {
        Self {
            source,
            replica,
            prefetch_delay: Some(Duration::from_millis(PREFETCH_DELAY_MS)),
        }
    }

    /// Disable the courtesy pre-fetch pause (used by tests).
    pub fn without_prefetch_delay(mut self) -> Self {
        self.prefetch_delay = None;
        self
    }

    pub fn with_prefetch_delay(mut self, delay: Duration) -> Self {
        self.prefetch_delay = Some(delay);
        self
    }

    /// Produce the best-available appointment list for `uid`.
    ///
    /// On a successful fetch the owner's replica rows are replaced with the
    /// filtered result before this returns, so a subsequent `get_by_owner`
    /// observes the just-written data. A failed write-through is logged and
    /// the fetched data is still returned as `Fresh`; the replica simply
    /// stays stale until the next successful refresh.
    pub async fn refresh(&self, uid: &str) -> RefreshOutcome {
        if let Some(delay) = self.prefetch_delay {
            tokio::time::sleep(delay).await;
        }

        match self.source.fetch_appointments().await {
            Ok(response) => {
                let total = response.count;
                let mine = ApiClient::filter_by_owner(response.appointments, uid);
                debug!(owner = %uid, total, matching = mine.len(), "remote fetch succeeded");

                if let Err(e) = self.replica.replace_all(uid, &mine).await {
                    warn!(owner = %uid, error = %e, "write-through failed, serving fetched data uncached");
                }

                RefreshOutcome {
                    appointments: mine,
                    provenance: Provenance::Fresh,
                }
            }
            Err(fetch_err) => {
                warn!(owner = %uid, error = %fetch_err, "remote fetch failed, falling back to replica");
                match self.replica.get_by_owner(uid).await {
                    // An empty replica has nothing to serve either; that is
                    // "unavailable", not stale data.
                    Ok(cached) if cached.is_empty() => RefreshOutcome {
                        appointments: cached,
                        provenance: Provenance::Unavailable,
                    },
                    Ok(cached) => {
                        debug!(owner = %uid, cached = cached.len(), "serving replica contents");
                        RefreshOutcome {
                            appointments: cached,
                            provenance: Provenance::Stale,
                        }
                    }
                    Err(store_err) => {
                        error!(owner = %uid, error = %store_err, "replica unavailable as well");
                        RefreshOutcome {
                            appointments: Vec::new(),
                            provenance: Provenance::Unavailable,
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
