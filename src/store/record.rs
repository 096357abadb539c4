use crate::models::{Appointment, AppointmentType};

/// Persisted shape of an appointment. The nested type reference is
/// flattened to two scalar columns so the replica needs no second table.
/// The mapping to and from `Appointment` is total and lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRecord {
    pub id: i64,
    pub art_id: i64,
    pub art_name: String,
    pub start: String,
    pub ende: String,
    pub ort: String,
    pub title: String,
    pub uid: String,
}

impl AppointmentRecord {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            art_id: appointment.art_id,
            art_name: appointment.art.name.clone(),
            start: appointment.start.clone(),
            ende: appointment.ende.clone(),
            ort: appointment.ort.clone(),
            title: appointment.title.clone(),
            uid: appointment.uid.clone(),
        }
    }

    pub fn into_appointment(self) -> Appointment {
        Appointment {
            id: self.id,
            art: AppointmentType {
                id: self.art_id,
                name: self.art_name,
            },
            art_id: self.art_id,
            start: self.start,
            ende: self.ende,
            ort: self.ort,
            title: self.title,
            uid: self.uid,
        }
    }

    /// Parse a record from a replica row. Column order matches
    /// `replica::SELECT_COLUMNS`.
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            art_id: row.get(1)?,
            art_name: row.get(2)?,
            start: row.get(3)?,
            ende: row.get(4)?,
            ort: row.get(5)?,
            title: row.get(6)?,
            uid: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment() -> Appointment {
        Appointment {
            id: 42,
            art: AppointmentType {
                id: 3,
                name: "Vor-Ort-Termin".to_string(),
            },
            art_id: 3,
            start: "2025-03-14T10:30:00".to_string(),
            ende: "2025-03-14T11:00:00".to_string(),
            ort: "Hamburg".to_string(),
            title: "Abnahme".to_string(),
            uid: "u1".to_string(),
        }
    }

    #[test]
    fn round_trips_through_the_flattened_shape() {
        let original = appointment();
        let record = AppointmentRecord::from_appointment(&original);
        assert_eq!(record.art_name, "Vor-Ort-Termin");
        assert_eq!(record.into_appointment(), original);
    }

    #[test]
    fn flattening_keeps_type_id_and_reference_in_sync() {
        let record = AppointmentRecord::from_appointment(&appointment());
        let restored = record.into_appointment();
        assert_eq!(restored.art.id, restored.art_id);
    }
}
