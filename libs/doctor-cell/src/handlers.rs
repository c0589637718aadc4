// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::TypedHeader;
use chrono::Local;
use headers::{Authorization, authorization::Bearer};
use serde_json::{Value, json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::SubmitReviewRequest;
use crate::services::{doctor::DoctorService, review::ReviewService};

#[axum::debug_handler]
pub async fn list_doctors(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service.list_doctors().await?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(&doctor_id).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    // Slot math runs on wall-clock time: the booked map keys and labels are
    // local clinic time, not instants.
    let days = doctor_service
        .get_week_slots(&doctor_id, Local::now().naive_local())
        .await?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "days": days,
        "total_slots": days.iter().map(|d| d.slots.len()).sum::<usize>()
    })))
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let stats = doctor_service.get_dashboard(auth.token()).await?;

    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn submit_review(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let review_service = ReviewService::new(&state);

    let response = review_service
        .submit_review(&doctor_id, request, auth.token())
        .await?;

    Ok(Json(json!(response)))
}
