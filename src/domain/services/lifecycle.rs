use crate::domain::models::booking::{Booking, BookingStatus};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot change booking status from {current} to {requested}")]
pub struct TransitionError {
    pub current: BookingStatus,
    pub requested: BookingStatus,
}

/// Statuses only move forward: Pending -> Confirmed -> Cancelled, or
/// Pending -> Cancelled. Requesting the current status is a no-op.
pub fn apply_status_transition(current: BookingStatus, requested: BookingStatus) -> Result<BookingStatus, TransitionError> {
    use BookingStatus::*;

    match (current, requested) {
        (a, b) if a == b => Ok(current),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => Ok(requested),
        _ => Err(TransitionError { current, requested }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// createdAt descending
    Latest,
    /// createdAt ascending
    Oldest,
    /// check-in date ascending
    CheckIn,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortBy::Latest),
            "oldest" => Ok(SortBy::Oldest),
            "checkIn" => Ok(SortBy::CheckIn),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub sort_by: Option<SortBy>,
}

/// Filters by status and orders the result. Without a sort order the
/// storage order is kept. Sorting is stable.
pub fn filter_and_sort(bookings: &[Booking], filter: &BookingFilter) -> Vec<Booking> {
    let mut selected: Vec<Booking> = bookings
        .iter()
        .filter(|b| filter.status.is_none_or(|status| b.status == status))
        .cloned()
        .collect();

    match filter.sort_by {
        Some(SortBy::Latest) => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortBy::Oldest) => selected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        Some(SortBy::CheckIn) => selected.sort_by(|a, b| a.check_in.cmp(&b.check_in)),
        None => {}
    }

    selected
}
