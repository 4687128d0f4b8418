use axum::{extract::OriginalUri, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Pearl of Skardu Resort API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn api_index() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Pearl of Skardu Resort & Restaurant - Booking API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "bookings": "/api/bookings",
        },
    }))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Route not found",
            "path": uri.path(),
        })),
    )
}
