use crate::domain::{models::booking::{Booking, BookingStatus}, ports::BookingRepository};
use crate::error::AppError;
use crate::infra::repositories::booking_row::{into_bookings, BookingRow};
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let row = sqlx::query_as::<_, BookingRow>("INSERT INTO bookings (id, booking_reference, room_type, name, phone, email, check_in, check_out, guests, message, nights, total_price, status, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *").bind(&booking.id).bind(&booking.booking_reference).bind(booking.room_type.as_str()).bind(&booking.name).bind(&booking.phone).bind(&booking.email).bind(booking.check_in).bind(booking.check_out).bind(booking.guests).bind(&booking.message).bind(booking.nights).bind(booking.total_price).bind(booking.status.as_str()).bind(booking.created_at).bind(booking.updated_at).fetch_one(&self.pool).await.map_err(AppError::from_write)?;
        row.try_into()
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)?.map(Booking::try_from).transpose()
    }
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE booking_reference = $1").bind(reference).fetch_optional(&self.pool).await.map_err(AppError::Database)?.map(Booking::try_from).transpose()
    }
    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings ORDER BY created_at ASC, id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)?;
        into_bookings(rows)
    }
    async fn update_status(&self, id: &str, expected: BookingStatus, next: BookingStatus, updated_at: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>("UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 AND status = $4 RETURNING *").bind(next.as_str()).bind(updated_at).bind(id).bind(expected.as_str()).fetch_optional(&self.pool).await.map_err(AppError::Database)?.map(Booking::try_from).transpose()
    }
}
