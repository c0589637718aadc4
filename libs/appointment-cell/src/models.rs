// libs/appointment-cell/src/models.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use shared_backend::BackendError;
use shared_models::error::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub doc_id: String,
    /// Date key in `D_M_YYYY` form, matching the doctor's booked map.
    pub slot_date: String,
    /// Time label, e.g. `10:00 AM`.
    pub slot_time: String,
    pub amount: f64,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Paid,
    Rejected,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Paid => write!(f, "paid"),
            AppointmentStatus::Rejected => write!(f, "rejected"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doc_id: String,
    pub slot_date: String,
    pub slot_time: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentListResponse {
    pub success: bool,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Login required to book an appointment")]
    Unauthenticated,

    #[error("No slot selected")]
    NoSlotSelected,

    #[error("Appointment slot not available")]
    SlotNotAvailable,

    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("{0}")]
    BackendRejection(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<BackendError> for AppointmentError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Auth(_) => AppointmentError::Unauthenticated,
            BackendError::NotFound(_) => AppointmentError::NotFound,
            other => AppointmentError::Network(other.to_string()),
        }
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Unauthenticated => AppError::Auth(err.to_string()),
            AppointmentError::NoSlotSelected
            | AppointmentError::SlotNotAvailable
            | AppointmentError::InvalidStatusTransition(_) => AppError::BadRequest(err.to_string()),
            AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::BackendRejection(msg) => AppError::Upstream(msg),
            AppointmentError::Network(msg) => AppError::Upstream(msg),
        }
    }
}
