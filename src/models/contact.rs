use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub strasse: String,
    pub hausnr: i64,
    pub plz: i64,
    pub ortsname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub id: i64,
    pub name: String,
    pub titel: String,
    pub geburtsdatum: String,
    pub adresse_id: i64,
    pub adresse: Address,
}

/// Address-book entry as returned by `GET /api/kontakt`. Contacts are the
/// candidates offered when attaching participants to a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    pub telefonnummer: String,
    pub rolle: String,
    pub ref_typ: String,
    pub referenz: i64,
    pub referenz_data: ReferenceData,
}

impl Contact {
    /// Label used when listing contacts for selection.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.rolle, self.email)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_contact_with_nested_reference() {
        let json = r#"{
            "contacts": [{
                "id": 3,
                "email": "info@example.de",
                "telefonnummer": "030123456",
                "rolle": "Geschäftsführer",
                "ref_typ": "person",
                "referenz": 7,
                "referenz_data": {
                    "id": 7,
                    "name": "Muster",
                    "titel": "Dr.",
                    "geburtsdatum": "1980-01-01",
                    "adresse_id": 9,
                    "adresse": {
                        "id": 9,
                        "strasse": "Hauptstraße",
                        "hausnr": 12,
                        "plz": 10115,
                        "ortsname": "Berlin"
                    }
                }
            }],
            "count": 1
        }"#;
        let response: ContactsResponse = serde_json::from_str(json).unwrap();
        let contact = &response.contacts[0];
        assert_eq!(contact.referenz_data.adresse.ortsname, "Berlin");
        assert_eq!(contact.display_name(), "Geschäftsführer - info@example.de");
    }
}
