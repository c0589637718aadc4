// libs/message-cell/src/handlers.rs
use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::{Value, json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::SendMessageRequest;
use crate::services::messages::MessageService;
use crate::services::poller::NotificationCache;

/// Shared state for the message routes: the notification cache is filled by
/// the background poller and only read here.
pub struct MessageState {
    pub config: AppConfig,
    pub notifications: Arc<NotificationCache>,
}

#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<Arc<MessageState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let message_service = MessageService::new(&state.config);

    let messages = message_service.list_messages(auth.token()).await?;

    Ok(Json(json!({
        "messages": messages,
        "total": messages.len()
    })))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<MessageState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let message_service = MessageService::new(&state.config);

    let response = message_service.send_message(request, auth.token()).await?;

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<MessageState>>,
) -> Result<Json<Value>, AppError> {
    let notifications = state.notifications.snapshot().await;

    Ok(Json(json!({
        "notifications": notifications,
        "total": notifications.len()
    })))
}
