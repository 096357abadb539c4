//! Refresh orchestration between the remote API and the local replica.
//!
//! This module provides the `SyncCoordinator`, which produces the
//! best-available appointment list for an owner: freshly fetched when the
//! network cooperates, the persisted replica when it does not, and an
//! empty list when neither source yields data. The caller always receives
//! a renderable result, tagged with its `Provenance`.

pub mod coordinator;

pub use coordinator::{
    AppointmentReplica, AppointmentSource, Provenance, RefreshOutcome, SyncCoordinator,
};
