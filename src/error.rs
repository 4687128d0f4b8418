use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use crate::config::ConfigError;
use crate::domain::services::{lifecycle::TransitionError, validation::FieldError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Too many requests")]
    RateLimited,
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

/// Detail of a 500 response, attached as a response extension. Only the
/// development error middleware copies it into the body.
#[derive(Clone, Debug)]
pub struct InternalErrorDetail(pub String);

impl AppError {
    /// Maps a unique-constraint violation to `Conflict`, everything else to `Database`.
    pub fn from_write(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error()
            && db_err.is_unique_violation() {
            return AppError::Conflict(db_err.message().to_string());
        }
        AppError::Database(e)
    }
}

fn error_body(message: &str) -> serde_json::Value {
    json!({ "status": "error", "message": message })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "error", "message": "Validation failed", "errors": errors }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, error_body(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, error_body(msg)),
            AppError::InvalidTransition(e) => (
                StatusCode::CONFLICT,
                json!({
                    "status": "error",
                    "message": e.to_string(),
                    "currentStatus": e.current,
                    "requestedStatus": e.requested,
                }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, error_body(msg)),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                error_body("Too many requests from this IP, please try again later."),
            ),
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Internal
            | AppError::InternalWithMsg(_) => {
                let detail = self.to_string();
                error!("Internal error: {}", detail);
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body("Internal server error")),
                ).into_response();
                response.extensions_mut().insert(InternalErrorDetail(detail));
                return response;
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::BookingStatus;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_errors_are_listed() {
        let err = AppError::Validation(vec![FieldError::new("guests", "Guests must be between 1 and 10")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["errors"][0]["field"], "guests");
    }

    #[tokio::test]
    async fn test_invalid_transition_is_conflict() {
        let err = AppError::from(TransitionError {
            current: BookingStatus::Confirmed,
            requested: BookingStatus::Pending,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["currentStatus"], "Confirmed");
        assert_eq!(body["requestedStatus"], "Pending");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_detail_in_body() {
        let response = AppError::InternalWithMsg("pool exhausted".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<InternalErrorDetail>().cloned().unwrap();
        assert!(detail.0.contains("pool exhausted"));

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("pool exhausted"));
    }
}
