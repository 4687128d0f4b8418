use crate::domain::models::booking::Booking;
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Column layout of the `bookings` table, shared by both backends.
/// Enums are stored as their display strings.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub booking_reference: String,
    pub room_type: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub message: Option<String>,
    pub nights: i32,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            room_type: row.room_type.parse().map_err(AppError::InternalWithMsg)?,
            status: row.status.parse().map_err(AppError::InternalWithMsg)?,
            id: row.id,
            booking_reference: row.booking_reference,
            name: row.name,
            phone: row.phone,
            email: row.email,
            check_in: row.check_in,
            check_out: row.check_out,
            guests: row.guests,
            message: row.message,
            nights: row.nights,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub fn into_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, AppError> {
    rows.into_iter().map(Booking::try_from).collect()
}
