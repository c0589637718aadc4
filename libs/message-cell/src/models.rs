// libs/message-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_backend::BackendError;
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub doctor_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageListResponse {
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationListResponse {
    pub success: bool,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Login required")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    BackendRejection(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<BackendError> for MessageError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Auth(_) => MessageError::Unauthenticated,
            other => MessageError::Network(other.to_string()),
        }
    }
}

impl From<MessageError> for AppError {
    fn from(err: MessageError) -> Self {
        match err {
            MessageError::Unauthenticated => AppError::Auth("Login required".to_string()),
            MessageError::ValidationError(msg) => AppError::ValidationError(msg),
            MessageError::BackendRejection(msg) => AppError::Upstream(msg),
            MessageError::Network(msg) => AppError::Upstream(msg),
        }
    }
}
