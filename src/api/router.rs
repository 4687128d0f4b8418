use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, health};
use crate::api::middleware::{
    error_detail::expose_error_detail,
    rate_limit::enforce_rate_limit,
    security_headers::with_security_headers,
};
use tower_http::{
    classify::ServerErrorsFailureClass,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/bookings/search/reference", get(booking::get_booking_by_reference))
        .route(
            "/bookings/{id}",
            get(booking::get_booking)
                .put(booking::update_booking_status)
                .delete(booking::cancel_booking),
        );

    let router = Router::new()
        .route("/", get(health::api_index))
        .nest("/api", api)
        .fallback(health::not_found)
        .layer(from_fn_with_state(state.clone(), enforce_rate_limit))
        .layer(from_fn_with_state(state.clone(), expose_error_detail))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors_layer(&state.config.cors_origin));

    with_security_headers(router)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}

/// `*` allows any origin without credentials; an explicit origin list
/// allows credentials.
fn cors_layer(cors_origin: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if cors_origin.trim() == "*" {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors_origin
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("No valid CORS origins configured, allowing any origin");
        return base.allow_origin(Any);
    }

    base.allow_origin(origins).allow_credentials(true)
}
