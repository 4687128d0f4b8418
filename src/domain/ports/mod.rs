use crate::domain::models::booking::{Booking, BookingStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a new booking. A duplicate id or reference yields `AppError::Conflict`.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, AppError>;
    /// All bookings in insertion order.
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    /// Compare-and-set on status: only writes when the stored status still
    /// equals `expected`. Returns `None` when nothing matched.
    async fn update_status(
        &self,
        id: &str,
        expected: BookingStatus,
        next: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Booking>, AppError>;
}
