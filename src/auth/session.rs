use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as handed over by the identity provider.
///
/// The uid is opaque: it is compared for exact equality and used as the
/// replica partition key, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub uid: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            created_at: Utc::now(),
        }
    }

    /// Partition key for all cache and filter operations.
    pub fn owner_id(&self) -> &str {
        &self.uid
    }

    /// Label for logs and the nav header: email when known, uid otherwise.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.uid)
    }
}
