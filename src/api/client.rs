//! API client for communicating with the CRM backend.
//!
//! This module provides the `ApiClient` struct for fetching appointments,
//! contacts, participants and protocols, and for the create/update writes.
//! All writes require connectivity; nothing is queued offline.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::models::{
    Appointment, AppointmentType, AppointmentTypesResponse, AppointmentsResponse, Contact,
    ContactsResponse, NewAppointment, NewOrder, NewParticipant, NewProtocol, Participant,
    ParticipantsResponse, Protocol, ProtocolsResponse,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 15s matches the backend's typical worst case while still failing fast
/// enough for the cache fallback to feel responsive.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Pause between dependent writes (participants, order) after creating an
/// appointment. The backend rate-limits bursts of requests.
const DEPENDENT_WRITE_DELAY_MS: u64 = 200;

/// API client for the CRM backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        Self::check_response(response).await
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Fetch the full appointment list. The backend cannot filter by owner,
    /// so the caller filters the result by uid.
    pub async fn fetch_appointments(&self) -> Result<AppointmentsResponse> {
        let response: AppointmentsResponse = self.get("/api/termine").await?;
        debug!(count = response.count, "fetched appointments");
        Ok(response)
    }

    pub async fn fetch_appointment_types(&self) -> Result<Vec<AppointmentType>> {
        let response: AppointmentTypesResponse = self.get("/api/terminart").await?;
        Ok(response.types)
    }

    /// Create an appointment and return the server-assigned id.
    pub async fn create_appointment(&self, new: &NewAppointment) -> Result<i64> {
        new.validate()?;

        let response = self.post_json("/api/termine", new).await?;
        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse create-appointment response")?;

        // The backend returns the id as a number, older versions as a string.
        extract_id(&body)
            .ok_or_else(|| ApiError::InvalidResponse("created appointment has no id".into()).into())
    }

    /// Create an appointment together with its dependent writes: the
    /// selected participants (first one is the main contact) and a stub
    /// order. Dependent write failures are logged but do not undo the
    /// already-created appointment.
    pub async fn create_appointment_with_participants(
        &self,
        new: &NewAppointment,
        participant_contact_ids: &[i64],
    ) -> Result<i64> {
        let termin_id = self.create_appointment(new).await?;

        for (index, &kontakt_id) in participant_contact_ids.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(DEPENDENT_WRITE_DELAY_MS)).await;
            }
            let participant = NewParticipant {
                kontakt_id,
                termin_id,
                ist_haupt: index == 0,
            };
            if let Err(e) = self.post_json("/api/teilnehmer", &participant).await {
                warn!(termin_id, kontakt_id, error = %e, "failed to attach participant");
            }
        }

        if let Some(&main_contact) = participant_contact_ids.first() {
            tokio::time::sleep(Duration::from_millis(DEPENDENT_WRITE_DELAY_MS)).await;
            let order = NewOrder::for_appointment(termin_id, main_contact);
            if let Err(e) = self.post_json("/api/auftrag", &order).await {
                warn!(termin_id, error = %e, "failed to create stub order");
            }
        }

        Ok(termin_id)
    }

    // ========================================================================
    // Contacts and participants
    // ========================================================================

    pub async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        let response: ContactsResponse = self.get("/api/kontakt").await?;
        debug!(count = response.count, "fetched contacts");
        Ok(response.contacts)
    }

    /// Participants of one appointment, filtered client-side by termin_id.
    pub async fn fetch_participants(&self, termin_id: i64) -> Result<Vec<Participant>> {
        let response: ParticipantsResponse = self.get("/api/teilnehmer").await?;
        Ok(response
            .participants
            .into_iter()
            .filter(|p| p.termin_id == termin_id)
            .collect())
    }

    // ========================================================================
    // Protocols
    // ========================================================================

    /// The protocol for one appointment, if any has been written yet.
    pub async fn fetch_protocol(&self, termin_id: i64) -> Result<Option<Protocol>> {
        let response: ProtocolsResponse = self.get("/api/protokoll").await?;
        Ok(response
            .protocols
            .into_iter()
            .find(|p| p.termin_id == termin_id))
    }

    pub async fn create_protocol(&self, new: &NewProtocol) -> Result<()> {
        new.validate()?;
        self.post_json("/api/protokoll", new).await?;
        Ok(())
    }

    pub async fn update_protocol(&self, id: i64, protocol: &NewProtocol) -> Result<()> {
        protocol.validate()?;
        let url = self.url(&format!("/api/protokoll/{}", id));
        let response = self
            .client
            .put(&url)
            .json(protocol)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", url))?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Convenience: the subset of a fetched appointment list that belongs
    /// to one owner.
    pub fn filter_by_owner(appointments: Vec<Appointment>, uid: &str) -> Vec<Appointment> {
        appointments.into_iter().filter(|a| a.uid == uid).collect()
    }
}

fn extract_id(body: &serde_json::Value) -> Option<i64> {
    let id = body.get("id")?;
    id.as_i64()
        .or_else(|| id.as_str().and_then(|s| s.parse().ok()))
}

// ============================================================================
// Tests
// ============================================================================
