use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Timestamp format used by the backend: ISO-8601 without offset.
/// The values are local-civil times, implicitly Europe/Berlin.
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Display format for dates in the client (German convention).
const DISPLAY_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub art: AppointmentType,
    pub art_id: i64,
    pub start: String,
    pub ende: String,
    pub ort: String,
    pub title: String,
    /// Owner identifier from the external identity provider. All cache
    /// operations are partitioned by this value.
    pub uid: String,
}

impl Appointment {
    /// Start timestamp formatted for display (`dd.MM.yyyy HH:mm`).
    /// Falls back to the truncated raw string if the value doesn't parse.
    pub fn formatted_start(&self) -> String {
        Self::format_wire_datetime(&self.start)
    }

    /// End timestamp formatted for display.
    pub fn formatted_end(&self) -> String {
        Self::format_wire_datetime(&self.ende)
    }

    fn format_wire_datetime(value: &str) -> String {
        match NaiveDateTime::parse_from_str(value, WIRE_DATETIME_FORMAT) {
            Ok(dt) => dt.format(DISPLAY_DATETIME_FORMAT).to_string(),
            Err(_) => value.chars().take(16).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentTypesResponse {
    #[serde(rename = "appointment_types")]
    pub types: Vec<AppointmentType>,
    pub count: i64,
}

/// Payload for `POST /api/termine`. The server assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub art_id: i64,
    pub start: String,
    pub ende: String,
    pub ort: String,
    pub title: String,
    pub uid: String,
}

impl NewAppointment {
    /// Check the required form fields before the payload goes anywhere
    /// near the network. The title is optional on the backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.art_id <= 0 {
            return Err(ValidationError::MissingField("art_id"));
        }
        if self.ort.trim().is_empty() {
            return Err(ValidationError::MissingField("ort"));
        }
        if self.start.trim().is_empty() {
            return Err(ValidationError::MissingField("start"));
        }
        if self.ende.trim().is_empty() {
            return Err(ValidationError::MissingField("ende"));
        }
        if self.uid.trim().is_empty() {
            return Err(ValidationError::MissingField("uid"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
