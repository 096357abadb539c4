//! Local replica store for offline access.
//!
//! This module provides the `ReplicaStore`, a SQLite-backed mirror of one
//! owner's appointment list. The replica is refreshed by full replacement
//! after every successful fetch and queried directly when the network is
//! down. Records are stored flattened (`AppointmentRecord`) to keep the
//! schema join-free.

pub mod record;
pub mod replica;

use thiserror::Error;

pub use record::AppointmentRecord;
pub use replica::ReplicaStore;

/// Persistence-layer failure. Kept distinct from "no rows" so callers can
/// tell an empty replica apart from an unavailable one.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}
