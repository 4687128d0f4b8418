use std::sync::Arc;
use crate::domain::{
    models::booking::{Booking, BookingRequest, BookingStatus},
    ports::BookingRepository,
    services::{
        lifecycle::{apply_status_transition, filter_and_sort, BookingFilter},
        reference::generate_reference,
        validation::validate,
    },
};
use crate::error::AppError;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

const MAX_REFERENCE_ATTEMPTS: usize = 5;
const MAX_STATUS_ATTEMPTS: usize = 3;

pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: &BookingRequest, today: NaiveDate) -> Result<Booking, AppError> {
        let validated = validate(request, today).map_err(AppError::Validation)?;

        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            let booking = Booking::new(validated.clone(), generate_reference(), Utc::now());
            match self.repo.create(&booking).await {
                Ok(created) => return Ok(created),
                Err(AppError::Conflict(reason)) => {
                    warn!(
                        attempt,
                        reference = %booking.booking_reference,
                        "Booking insert collided, regenerating reference: {}", reason
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::InternalWithMsg(format!(
            "Could not allocate a unique booking reference after {} attempts",
            MAX_REFERENCE_ATTEMPTS
        )))
    }

    pub async fn find(&self, id: &str) -> Result<Booking, AppError> {
        self.repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    pub async fn find_by_reference(&self, reference: &str) -> Result<Booking, AppError> {
        self.repo.find_by_reference(reference).await?
            .ok_or(AppError::NotFound("Booking not found with this reference".into()))
    }

    pub async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        let bookings = self.repo.list().await?;
        Ok(filter_and_sort(&bookings, filter))
    }

    /// Moves a booking to `requested`. A request for the current status
    /// returns the booking without writing.
    pub async fn update_status(&self, id: &str, requested: BookingStatus) -> Result<Booking, AppError> {
        for _ in 0..MAX_STATUS_ATTEMPTS {
            let booking = self.find(id).await?;
            let next = apply_status_transition(booking.status, requested)?;
            if next == booking.status {
                return Ok(booking);
            }

            // None means another writer changed the status between read and write
            if let Some(updated) = self.repo.update_status(&booking.id, booking.status, next, Utc::now()).await? {
                info!(booking_id = %updated.id, from = %booking.status, to = %next, "Booking status changed");
                return Ok(updated);
            }
        }

        Err(AppError::Conflict("Booking was modified concurrently, please retry".into()))
    }

    pub async fn cancel(&self, id: &str) -> Result<Booking, AppError> {
        self.update_status(id, BookingStatus::Cancelled).await
    }
}
