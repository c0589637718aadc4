// libs/doctor-cell/src/models.rs
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shared_backend::BackendError;
use shared_models::error::AppError;

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

/// A doctor profile as the backend returns it. `slots_booked` maps a date key
/// (`D_M_YYYY`) to the time labels already taken on that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub speciality: String,
    pub fees: f64,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub slots_booked: HashMap<String, Vec<String>>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorListResponse {
    pub success: bool,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

// ==============================================================================
// SLOT MODELS
// ==============================================================================

/// A bookable time window. Derived, never persisted; regenerated on every
/// request against the doctor's current booked map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub starts_at: NaiveDateTime,
    pub label: String,
}

/// One calendar day's worth of available slots. A day past closing time is
/// still emitted with an empty `slots` list so day indices stay aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub date_key: String,
    pub slots: Vec<Slot>,
}

// ==============================================================================
// REVIEWS AND STATS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDashboard {
    pub earnings: f64,
    pub appointment_count: i64,
    pub patient_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: DoctorDashboard,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Login required")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    BackendRejection(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<BackendError> for DoctorError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Auth(_) => DoctorError::Unauthenticated,
            BackendError::NotFound(_) => DoctorError::NotFound,
            other => DoctorError::Network(other.to_string()),
        }
    }
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            DoctorError::Unauthenticated => AppError::Auth("Login required".to_string()),
            DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
            DoctorError::BackendRejection(msg) => AppError::Upstream(msg),
            DoctorError::Network(msg) => AppError::Upstream(msg),
        }
    }
}
