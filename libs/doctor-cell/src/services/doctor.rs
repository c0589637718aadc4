// libs/doctor-cell/src/services/doctor.rs
use chrono::NaiveDateTime;
use reqwest::Method;
use tracing::debug;

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::{DashboardResponse, DaySlots, Doctor, DoctorDashboard, DoctorError, DoctorListResponse};
use crate::services::slots;

pub struct DoctorService {
    backend: BackendClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    /// Fetch a doctor profile, including the booked-slot map.
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let doctor: Doctor = self
            .backend
            .request(Method::GET, &format!("/api/doctor/{}", doctor_id), None, None)
            .await?;

        Ok(doctor)
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let response: DoctorListResponse = self
            .backend
            .request(Method::GET, "/api/doctor/list", None, None)
            .await?;

        if !response.success {
            return Err(DoctorError::BackendRejection(
                "Failed to load doctors".to_string(),
            ));
        }

        Ok(response.doctors)
    }

    /// Compute the doctor's 7-day booking window as of `now`. Slots already
    /// present in the booked map are filtered out; the backend remains the
    /// authority on conflicts at booking time.
    pub async fn get_week_slots(
        &self,
        doctor_id: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<DaySlots>, DoctorError> {
        let doctor = self.get_doctor(doctor_id).await?;
        Ok(slots::generate_week(now, &doctor.slots_booked))
    }

    /// Earnings and volume statistics for the doctor dashboard.
    pub async fn get_dashboard(&self, auth_token: &str) -> Result<DoctorDashboard, DoctorError> {
        if auth_token.is_empty() {
            return Err(DoctorError::Unauthenticated);
        }

        let response: DashboardResponse = self
            .backend
            .request(Method::GET, "/api/doctor/dashboard", Some(auth_token), None)
            .await?;

        if !response.success {
            return Err(DoctorError::BackendRejection(
                "Failed to load dashboard".to_string(),
            ));
        }

        Ok(response.stats)
    }
}
