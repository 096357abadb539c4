use serde::{Deserialize, Serialize};

/// Contact details embedded in a participant row. The backend does not
/// include the person's name here, only the role and reachability info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: i64,
    pub email: String,
    pub telefonnummer: String,
    pub rolle: String,
    pub ref_typ: String,
    #[serde(rename = "person_Id", default)]
    pub person_id: Option<i64>,
    #[serde(rename = "unternehmen_Id", default)]
    pub unternehmen_id: Option<i64>,
}

/// A contact attached to a specific appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub termin_id: i64,
    pub kontakt_id: i64,
    pub kontakt: ContactInfo,
}

impl Participant {
    /// The role stands in for a name; the response carries no real name.
    pub fn name(&self) -> &str {
        &self.kontakt.rolle
    }

    pub fn email(&self) -> &str {
        &self.kontakt.email
    }

    pub fn phone(&self) -> &str {
        &self.kontakt.telefonnummer
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<Participant>,
    pub count: i64,
}

/// Payload for `POST /api/teilnehmer`.
#[derive(Debug, Clone, Serialize)]
pub struct NewParticipant {
    pub kontakt_id: i64,
    pub termin_id: i64,
    /// The first participant added to an appointment is its main contact.
    #[serde(rename = "istHaupt")]
    pub ist_haupt: bool,
}

/// Importance level "normal" in the backend's Wichtigkeit table.
const NORMAL_IMPORTANCE_ID: i64 = 2;

/// Payload for `POST /api/auftrag`. A stub order accompanies every created
/// appointment so downstream order tracking has something to hang on to.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub bezeichnung: String,
    pub wichtigkeit_id: i64,
    pub kontakt_id: i64,
    pub termin_id: i64,
}

impl NewOrder {
    pub fn for_appointment(termin_id: i64, kontakt_id: i64) -> Self {
        Self {
            bezeichnung: format!("Termin {}", termin_id),
            wichtigkeit_id: NORMAL_IMPORTANCE_ID,
            kontakt_id,
            termin_id,
        }
    }
}
