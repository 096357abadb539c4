//! Offline-first core for a mobile CRM client.
//!
//! The crate fetches appointments, contacts, participants and protocols
//! from a remote JSON API and mirrors the signed-in user's appointment
//! list into a local SQLite replica. When the network is down, the
//! replica is served instead, tagged as stale; the caller always gets a
//! renderable list.
//!
//! The interesting pieces:
//! - [`store::ReplicaStore`]: the persisted per-owner mirror with
//!   transactional full-set replacement.
//! - [`sync::SyncCoordinator`]: fetch, filter by owner, write through,
//!   degrade to the replica on failure.
//! - [`api::ApiClient`]: the backend consumer, including the dependent
//!   writes that follow appointment creation.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod store;
pub mod sync;

pub use api::{ApiClient, ApiError};
pub use auth::UserSession;
pub use config::Config;
pub use models::{Appointment, AppointmentType};
pub use store::{ReplicaStore, StoreError};
pub use sync::{Provenance, RefreshOutcome, SyncCoordinator};
