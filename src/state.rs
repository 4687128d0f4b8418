use std::sync::Arc;
use crate::api::middleware::rate_limit::{build_rate_limiter, IpRateLimiter};
use crate::config::Config;
use crate::domain::ports::BookingRepository;
use crate::domain::services::booking_service::BookingService;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_service: Arc<BookingService>,
    pub rate_limiter: Arc<IpRateLimiter>,
}

impl AppState {
    pub fn new(config: Config, booking_repo: Arc<dyn BookingRepository>) -> Result<Self, AppError> {
        let rate_limiter = Arc::new(build_rate_limiter(&config.rate_limit)?);
        Ok(Self {
            booking_service: Arc::new(BookingService::new(booking_repo)),
            rate_limiter,
            config,
        })
    }
}
