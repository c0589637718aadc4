// libs/payment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_backend::BackendError;
use shared_models::error::AppError;

// ==============================================================================
// PAYMENT LIFECYCLE
// ==============================================================================

/// Client-side view of an appointment's payment lifecycle. `Pending` has no
/// automatic outgoing transition; the user retries manually. `Completed` and
/// `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPhase {
    Unpaid,
    AwaitingGateway,
    Completed,
    Pending,
    Failed,
}

impl PaymentPhase {
    pub fn valid_transitions(&self) -> Vec<PaymentPhase> {
        match self {
            PaymentPhase::Unpaid => vec![PaymentPhase::AwaitingGateway],
            PaymentPhase::AwaitingGateway => vec![
                PaymentPhase::Completed,
                PaymentPhase::Pending,
                PaymentPhase::Failed,
            ],
            // Manual retry re-enters the gateway; nothing happens on its own.
            PaymentPhase::Pending => vec![PaymentPhase::AwaitingGateway],
            PaymentPhase::Completed => vec![],
            PaymentPhase::Failed => vec![],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentPhase::Completed | PaymentPhase::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Khalti,
    Esewa,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Khalti => write!(f, "khalti"),
            PaymentMethod::Esewa => write!(f, "esewa"),
        }
    }
}

// ==============================================================================
// PENDING PAYMENT CACHE
// ==============================================================================

/// Transient record bridging the hop to an external gateway and back. Held in
/// the session-scoped store and cleared exactly once, on a terminal
/// reconciliation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPayment {
    pub appointment_id: String,
    pub buyer_name: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// The completion document posted to the backend once a gateway payment is
/// confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub appointment_id: String,
    pub user: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: String,
    pub transaction_id: String,
    pub payment_date: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub appointment_id: String,
    pub buyer_name: String,
    pub amount: f64,
    pub method: PaymentMethod,
}

/// Query parameters a gateway redirect may carry. Parsed structurally; the
/// old positional split of the raw URL is gone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectQuery {
    pub pidx: Option<String>,
    #[serde(rename = "txnId")]
    pub txn_id: Option<String>,
}

impl RedirectQuery {
    pub fn transaction_id(&self) -> Option<&str> {
        self.pidx.as_deref().or(self.txn_id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentRequest {
    pub redirect_url: String,
}

/// Backend verify response: `{ "message": { "status" | "payment_status" } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub message: VerifyMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyMessage {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

impl VerifyMessage {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().or(self.payment_status.as_deref())
    }
}

/// What the gateway reported for a transaction, as interpreted by the verify
/// endpoint. Anything besides completed/pending is ambiguous and handled as a
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayStatus {
    Completed,
    Pending,
    Other(String),
}

impl GatewayStatus {
    pub fn from_backend(status: &str) -> Self {
        match status {
            "Completed" => GatewayStatus::Completed,
            "Pending" => GatewayStatus::Pending,
            other => GatewayStatus::Other(other.to_string()),
        }
    }
}

/// Result of a reconciliation attempt, reported to the caller as data rather
/// than as an error: the UI chooses a route off the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    Completed { transaction_id: String },
    Pending,
    Failed { reason: String },
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Login required")]
    Unauthenticated,

    #[error("No pending payment for this session")]
    NoPendingPayment,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    BackendRejection(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<BackendError> for PaymentError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Auth(_) => PaymentError::Unauthenticated,
            other => PaymentError::Network(other.to_string()),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Unauthenticated => AppError::Auth("Login required".to_string()),
            PaymentError::NoPendingPayment => AppError::NotFound(err.to_string()),
            PaymentError::ValidationError(msg) => AppError::ValidationError(msg),
            PaymentError::BackendRejection(msg) => AppError::Upstream(msg),
            PaymentError::Network(msg) => AppError::Upstream(msg),
        }
    }
}
