use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use validator::Validate;
use crate::domain::services::validation::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Deluxe Room")]
    DeluxeRoom,
    #[serde(rename = "Luxury Suite")]
    LuxurySuite,
    #[serde(rename = "VIP Suite")]
    VipSuite,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::DeluxeRoom, RoomType::LuxurySuite, RoomType::VipSuite];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::DeluxeRoom => "Deluxe Room",
            RoomType::LuxurySuite => "Luxury Suite",
            RoomType::VipSuite => "VIP Suite",
        }
    }

    /// Price of one night in USD.
    pub fn nightly_rate(&self) -> f64 {
        match self {
            RoomType::DeluxeRoom => 150.0,
            RoomType::LuxurySuite => 250.0,
            RoomType::VipSuite => 400.0,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room| room.as_str() == s)
            .ok_or_else(|| format!("Unknown room type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown booking status: {}", s))
    }
}

pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles")
});

/// Booking request as submitted by the booking form. Every field is optional
/// so that missing values surface as validation errors.
#[derive(Debug, Clone, Default, Validate)]
pub struct BookingRequest {
    #[validate(required(message = "Room type is required"))]
    pub room_type: Option<String>,
    #[validate(
        required(message = "Name is required"),
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Phone number is required"),
        regex(path = *PHONE_PATTERN, message = "Please provide a valid phone number")
    )]
    pub phone: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Please provide a valid email address")
    )]
    pub email: Option<String>,
    #[validate(required(message = "Check-in date is required"))]
    pub check_in: Option<String>,
    #[validate(required(message = "Check-out date is required"))]
    pub check_out: Option<String>,
    #[validate(
        required(message = "Number of guests is required"),
        range(min = 1, max = 10, message = "Guests must be between 1 and 10")
    )]
    pub guests: Option<i64>,
    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    pub message: Option<String>,
    /// Fields that were present with the wrong JSON type.
    pub malformed: Vec<FieldError>,
}

impl BookingRequest {
    /// Reads a request from an arbitrary JSON object. A field of the wrong
    /// type is recorded in `malformed` and left empty, so it is reported
    /// alongside every other violation instead of failing the whole body.
    pub fn from_json(body: &Map<String, Value>) -> Self {
        let mut malformed = Vec::new();
        let mut text = |key: &str, label: &str| match body.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(raw.clone()),
            Some(_) => {
                malformed.push(FieldError::new(key, format!("{} must be a string", label)));
                None
            }
        };

        let room_type = text("roomType", "Room type");
        let name = text("name", "Name");
        let phone = text("phone", "Phone number");
        let email = text("email", "Email");
        let check_in = text("checkIn", "Check-in date");
        let check_out = text("checkOut", "Check-out date");
        let message = text("message", "Message");

        // whole numbers, either as JSON integers or integer strings
        let guests = match body.get("guests") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(raw)) => raw.trim().parse().ok(),
            Some(_) => None,
        };
        if guests.is_none() && body.get("guests").is_some_and(|v| !v.is_null()) {
            malformed.push(FieldError::new("guests", "Number of guests must be a whole number"));
        }

        Self { room_type, name, phone, email, check_in, check_out, guests, message, malformed }
    }
}

/// A request that passed every field rule, with nights and price derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub room_type: RoomType,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub message: Option<String>,
    pub nights: i32,
    pub total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub booking_reference: String,
    pub room_type: RoomType,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub message: Option<String>,
    pub nights: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(validated: ValidatedBooking, booking_reference: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_reference,
            room_type: validated.room_type,
            name: validated.name,
            phone: validated.phone,
            email: validated.email,
            check_in: validated.check_in,
            check_out: validated.check_out,
            guests: validated.guests,
            message: validated.message,
            nights: validated.nights,
            total_price: validated.total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
