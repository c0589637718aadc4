// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use serde_json::{Value, json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::BookAppointmentRequest;
use crate::services::booking::BookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let response = booking_service
        .book_appointment(request, auth.token())
        .await?;

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointments = booking_service.list_appointments(auth.token()).await?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let response = booking_service
        .cancel_appointment(&appointment_id, auth.token())
        .await?;

    Ok(Json(json!(response)))
}
