//! Data models for CRM entities.
//!
//! This module contains all the data structures exchanged with the
//! CRM backend, including:
//!
//! - `Appointment`, `AppointmentType`: calendar entries and their kinds
//! - `Contact`: address-book entries offered as appointment participants
//! - `Participant`: a contact attached to a specific appointment
//! - `Protocol`: the written meeting protocol for an appointment
//! - `New*` payloads for the create/update endpoints
//!
//! Field names follow the backend's German wire vocabulary
//! (`termin`, `art`, `ort`, `ende`, ...) so serde needs few renames.

pub mod appointment;
pub mod contact;
pub mod participant;
pub mod protocol;
pub mod validation;

pub use appointment::{
    Appointment, AppointmentType, AppointmentTypesResponse, AppointmentsResponse, NewAppointment,
};
pub use contact::{Address, Contact, ContactsResponse, ReferenceData};
pub use participant::{ContactInfo, NewOrder, NewParticipant, Participant, ParticipantsResponse};
pub use protocol::{NewProtocol, Protocol, ProtocolsResponse};
pub use validation::{parse_duration, ValidationError};
