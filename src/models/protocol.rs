use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Written meeting protocol for an appointment. `dauer` is the meeting
/// duration in minutes, `tldr` the one-line summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protocol {
    pub id: i64,
    pub termin_id: i64,
    pub datum: String,
    pub dauer: i64,
    pub tldr: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolsResponse {
    pub protocols: Vec<Protocol>,
    pub count: i64,
}

/// Payload for `POST /api/protokoll` and `PUT /api/protokoll/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProtocol {
    pub termin_id: i64,
    pub datum: String,
    pub dauer: i64,
    pub tldr: String,
    pub text: String,
}

impl NewProtocol {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tldr.trim().is_empty() {
            return Err(ValidationError::MissingField("tldr"));
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::MissingField("text"));
        }
        if self.dauer <= 0 {
            return Err(ValidationError::InvalidDuration(self.dauer.to_string()));
        }
        Ok(())
    }
}
