use resort_booking_backend::{
    api::router::create_router,
    state::AppState,
    config::{Config, Environment, RateLimitSettings},
    infra::repositories::sqlite_booking_repo::SqliteBookingRepo,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, header},
    response::Response,
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

pub fn test_config(db_url: &str) -> Config {
    Config {
        database_url: db_url.to_string(),
        port: 0,
        cors_origin: "*".to_string(),
        rate_limit: RateLimitSettings {
            window: Duration::from_secs(900),
            max_requests: 10_000,
        },
        trust_proxy: false,
        environment: Environment::Production,
        log_dir: "./logs".to_string(),
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut config = test_config(&db_url);
        customize(&mut config);

        let repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let state = Arc::new(AppState::new(config, repo).expect("Failed to build state"));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(payload) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(payload.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    /// Sends `body` verbatim as a JSON request.
    #[allow(dead_code)]
    pub async fn send_raw(&self, method: &str, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a GET as if it arrived over a connection from `peer`.
    #[allow(dead_code)]
    pub async fn get_from(&self, uri: &str, peer: [u8; 4], forwarded_for: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = forwarded_for {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(SocketAddr::from((peer, 40000))));
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Creates a booking and returns the `data` object of the response.
    #[allow(dead_code)]
    pub async fn create_booking(&self, payload: Value) -> Value {
        let response = self.send("POST", "/api/bookings", Some(payload)).await;
        assert_eq!(response.status(), 201, "booking creation failed");
        parse_body(response).await["data"].clone()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Date `days` from today as `YYYY-MM-DD`.
#[allow(dead_code)]
pub fn days_from_now(days: i64) -> String {
    (Utc::now() + ChronoDuration::days(days)).format("%Y-%m-%d").to_string()
}

#[allow(dead_code)]
pub fn booking_payload(room_type: &str, check_in_days: i64, nights: i64) -> Value {
    json!({
        "roomType": room_type,
        "name": "Ahmed Khan",
        "phone": "+923489926060",
        "email": "ahmed.khan@example.com",
        "checkIn": days_from_now(check_in_days),
        "checkOut": days_from_now(check_in_days + nights),
        "guests": 3,
        "message": "Please arrange airport pickup and late check-in."
    })
}
