//! Session types at the identity-provider boundary.
//!
//! Sign-in itself happens in an external identity provider; this crate
//! only ever sees the resulting opaque subject id. `UserSession` carries
//! that id (plus the display email) through the client.

pub mod session;

pub use session::UserSession;
