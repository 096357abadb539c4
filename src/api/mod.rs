//! REST API client module for the CRM backend.
//!
//! This module provides the `ApiClient` for consuming the backend's JSON
//! interface: appointment list/create, appointment types, contacts,
//! participants, orders and protocols.
//!
//! The backend is treated as a black box; it offers no server-side owner
//! filtering, so list endpoints return the full set and callers filter
//! client-side.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
