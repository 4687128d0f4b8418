use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use crate::error::InternalErrorDetail;
use crate::state::AppState;

/// In development, copies the internal error detail into 500 response bodies.
pub async fn expose_error_detail(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    if !state.config.environment.is_development() {
        return response;
    }

    match response.extensions_mut().remove::<InternalErrorDetail>() {
        Some(InternalErrorDetail(detail)) => (
            response.status(),
            Json(json!({
                "status": "error",
                "message": "Internal server error",
                "detail": detail,
            })),
        ).into_response(),
        None => response,
    }
}
