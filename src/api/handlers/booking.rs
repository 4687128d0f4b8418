use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::dtos::requests::{ListBookingsQuery, ReferenceQuery};
use crate::api::dtos::responses::ApiResponse;
use crate::domain::models::booking::{BookingRequest, BookingStatus};
use crate::domain::services::lifecycle::BookingFilter;
use crate::domain::services::validation::FieldError;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let Value::Object(body) = payload else {
        return Err(AppError::BadRequest("Request body must be a JSON object".into()));
    };
    let request = BookingRequest::from_json(&body);
    let today = Utc::now().date_naive();

    let created = state.booking_service.create(&request, today).await.inspect_err(|e| {
        if let AppError::Validation(errors) = e {
            warn!(error_count = errors.len(), "Booking request rejected by validation");
        }
    })?;

    info!(
        booking_id = %created.id,
        reference = %created.booking_reference,
        room_type = %created.room_type,
        nights = created.nights,
        "Booking created"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Booking created successfully", created)),
    ))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_status(raw)?),
    };
    // unknown sort orders keep storage order
    let sort_by = params.sort_by.as_deref().and_then(|raw| raw.trim().parse().ok());

    let bookings = state.booking_service.list(&BookingFilter { status, sort_by }).await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.find(&booking_id).await?;
    Ok(Json(ApiResponse::success(booking)))
}

pub async fn get_booking_by_reference(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReferenceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reference = params.reference
        .map(|r| r.trim().to_ascii_uppercase())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation(vec![
            FieldError::new("reference", "Booking reference is required"),
        ]))?;

    let booking = state.booking_service.find_by_reference(&reference).await?;
    Ok(Json(ApiResponse::success(booking)))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let requested = match payload.get("status") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) if raw.trim().is_empty() => None,
        Some(Value::String(raw)) => Some(parse_status(raw.trim())?),
        Some(_) => {
            return Err(AppError::Validation(vec![FieldError::new("status", "Status must be a string")]));
        }
    }
    .ok_or_else(|| AppError::Validation(vec![FieldError::new("status", "Status is required")]))?;

    let updated = state.booking_service.update_status(&booking_id, requested).await?;
    Ok(Json(ApiResponse::with_message("Booking updated successfully", updated)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.booking_service.cancel(&booking_id).await?;
    info!(booking_id = %cancelled.id, "Booking cancelled");
    Ok(Json(ApiResponse::with_message("Booking cancelled successfully", cancelled)))
}

fn parse_status(raw: &str) -> Result<BookingStatus, AppError> {
    raw.parse().map_err(|_| {
        let options: Vec<&str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::Validation(vec![FieldError::new(
            "status",
            format!("Status must be one of: {}", options.join(", ")),
        )])
    })
}
