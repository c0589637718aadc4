// libs/payment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::{Value, json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ConfirmPaymentRequest, InitiatePaymentRequest, RedirectQuery};
use crate::services::reconcile::ReconcileService;
use crate::store::PendingPaymentStore;

/// Shared state for the payment routes: the pending-payment store outlives
/// individual requests, unlike the per-request services.
pub struct PaymentState {
    pub config: AppConfig,
    pub store: Arc<PendingPaymentStore>,
}

pub const SESSION_HEADER: &str = "x-session-id";

fn session_id(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| AppError::BadRequest("Missing x-session-id header".to_string()))
}

#[axum::debug_handler]
pub async fn initiate_payment(
    State(state): State<Arc<PaymentState>>,
    headers: HeaderMap,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let session = session_id(&headers)?;
    let reconcile_service = ReconcileService::new(&state.config, Arc::clone(&state.store));

    let redirect_url = reconcile_service
        .initiate(&session, request, auth.token())
        .await?;

    Ok(Json(json!({
        "success": true,
        "redirect_url": redirect_url
    })))
}

#[axum::debug_handler]
pub async fn verify_payment(
    State(state): State<Arc<PaymentState>>,
    headers: HeaderMap,
    Query(query): Query<RedirectQuery>,
) -> Result<Json<Value>, AppError> {
    let session = session_id(&headers)?;
    let reconcile_service = ReconcileService::new(&state.config, Arc::clone(&state.store));

    let outcome = reconcile_service.verify_redirect(&session, &query).await?;

    Ok(Json(json!(outcome)))
}

#[axum::debug_handler]
pub async fn confirm_payment(
    State(state): State<Arc<PaymentState>>,
    headers: HeaderMap,
    Json(request): Json<ConfirmPaymentRequest>,
) -> Result<Json<Value>, AppError> {
    let session = session_id(&headers)?;
    let reconcile_service = ReconcileService::new(&state.config, Arc::clone(&state.store));

    let outcome = reconcile_service
        .confirm_from_redirect(&session, &request.redirect_url)
        .await?;

    Ok(Json(json!(outcome)))
}
