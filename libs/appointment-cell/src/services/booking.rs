// libs/appointment-cell/src/services/booking.rs
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

use doctor_cell::models::Doctor;
use shared_backend::BackendClient;
use shared_config::AppConfig;
use shared_models::api::ApiMessage;

use crate::models::{
    Appointment, AppointmentError, AppointmentListResponse, BookAppointmentRequest,
};

pub struct BookingService {
    backend: BackendClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Submit a booking for a selected slot.
    ///
    /// Preconditions are checked before any network traffic: an auth token
    /// must be present and a time label selected. The availability check
    /// against the doctor's booked map is optimistic only; the backend is the
    /// sole authority on double-booking and its rejection message is passed
    /// through verbatim.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<ApiMessage, AppointmentError> {
        if auth_token.is_empty() {
            return Err(AppointmentError::Unauthenticated);
        }
        if request.slot_time.trim().is_empty() {
            return Err(AppointmentError::NoSlotSelected);
        }
        if request.slot_date.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "No appointment date selected".to_string(),
            ));
        }

        debug!(
            "Booking slot {} {} with doctor {}",
            request.slot_date, request.slot_time, request.doc_id
        );

        // Optimistic check against the current booked map. A stale snapshot
        // here is fine; the backend re-checks on insert.
        let doctor: Doctor = self
            .backend
            .request(
                Method::GET,
                &format!("/api/doctor/{}", request.doc_id),
                None,
                None,
            )
            .await?;

        let already_taken = doctor
            .slots_booked
            .get(&request.slot_date)
            .map(|times| times.iter().any(|t| t == &request.slot_time))
            .unwrap_or(false);

        if already_taken {
            warn!(
                "Slot {} {} already booked for doctor {}",
                request.slot_date, request.slot_time, request.doc_id
            );
            return Err(AppointmentError::SlotNotAvailable);
        }

        let body = json!({
            "docId": request.doc_id,
            "slotDate": request.slot_date,
            "slotTime": request.slot_time,
            "reason": request.reason,
        });

        let response: ApiMessage = self
            .backend
            .request(
                Method::POST,
                "/api/user/book-appointment",
                Some(auth_token),
                Some(body),
            )
            .await?;

        if !response.success {
            return Err(AppointmentError::BackendRejection(response.message));
        }

        info!(
            "Appointment booked with doctor {} at {} {}",
            request.doc_id, request.slot_date, request.slot_time
        );
        Ok(response)
    }

    pub async fn list_appointments(
        &self,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        if auth_token.is_empty() {
            return Err(AppointmentError::Unauthenticated);
        }

        let response: AppointmentListResponse = self
            .backend
            .request(Method::GET, "/api/user/appointments", Some(auth_token), None)
            .await?;

        if !response.success {
            return Err(AppointmentError::BackendRejection(
                "Failed to load appointments".to_string(),
            ));
        }

        Ok(response.appointments)
    }

    pub async fn cancel_appointment(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<ApiMessage, AppointmentError> {
        if auth_token.is_empty() {
            return Err(AppointmentError::Unauthenticated);
        }

        debug!("Cancelling appointment {}", appointment_id);

        let response: ApiMessage = self
            .backend
            .request(
                Method::POST,
                "/api/user/cancel-appointment",
                Some(auth_token),
                Some(json!({ "appointmentId": appointment_id })),
            )
            .await?;

        if !response.success {
            return Err(AppointmentError::BackendRejection(response.message));
        }

        info!("Appointment {} cancelled", appointment_id);
        Ok(response)
    }
}
