use crate::domain::models::booking::{BookingRequest, RoomType, ValidatedBooking, PHONE_PATTERN};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use validator::{Validate, ValidateEmail, ValidationErrors};

pub const MAX_STAY_NIGHTS: i64 = 90;

/// Wire names of the request fields, in the order errors are reported.
const FIELD_ORDER: [&str; 8] = ["roomType", "name", "phone", "email", "checkIn", "checkOut", "guests", "message"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

/// Checks every field of a booking request and derives nights and total price.
///
/// All violations are collected, one per field, so a caller can report every
/// problem in one response. `today` is the server date used for the check-in
/// lower bound.
pub fn validate(request: &BookingRequest, today: NaiveDate) -> Result<ValidatedBooking, Vec<FieldError>> {
    let request = normalize(request);
    let mut errors = request.malformed.clone();

    if let Err(report) = request.validate() {
        errors.extend(field_errors(&report));
    }

    if let Some(email) = request.email.as_deref()
        && email.validate_email()
        && !has_dotted_domain(email)
    {
        errors.push(FieldError::new("email", "Please provide a valid email address"));
    }

    let room_type = request.room_type.as_deref().and_then(|raw| match raw.parse::<RoomType>() {
        Ok(room) => Some(room),
        Err(_) => {
            let options: Vec<&str> = RoomType::ALL.iter().map(|r| r.as_str()).collect();
            errors.push(FieldError::new("roomType", format!("Room type must be one of: {}", options.join(", "))));
            None
        }
    });

    let parsed_check_in = request.check_in.as_deref().map(parse_date);
    let check_in = match parsed_check_in {
        Some(Some(date)) if date < today => {
            errors.push(FieldError::new("checkIn", "Check-in date cannot be in the past"));
            None
        }
        Some(Some(date)) => Some(date),
        Some(None) => {
            errors.push(FieldError::new("checkIn", "Check-in date must be a valid date (YYYY-MM-DD)"));
            None
        }
        None => None,
    };

    let check_out = request.check_out.as_deref().and_then(|raw| match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.push(FieldError::new("checkOut", "Check-out date must be a valid date (YYYY-MM-DD)"));
            None
        }
    });

    // Span rules use the parsed check-in even when it lies in the past, so a
    // past check-in does not hide an inverted or over-long stay.
    let nights = match (parsed_check_in.flatten(), check_out) {
        (Some(start), Some(end)) => {
            let span = (end - start).num_days();
            if span <= 0 {
                errors.push(FieldError::new("checkOut", "Check-out date must be after check-in date"));
                None
            } else if span > MAX_STAY_NIGHTS {
                errors.push(FieldError::new(
                    "checkOut",
                    format!("Booking cannot exceed {} nights", MAX_STAY_NIGHTS),
                ));
                None
            } else {
                i32::try_from(span).ok()
            }
        }
        _ => None,
    };

    if !errors.is_empty() {
        // stable, so a malformed-type error wins over the derived "required"
        errors.sort_by_key(|e| field_rank(&e.field));
        errors.dedup_by(|later, first| later.field == first.field);
        return Err(errors);
    }

    let guests = request.guests.and_then(|n| i32::try_from(n).ok());
    match (room_type, request.name, request.phone, request.email, check_in, check_out, guests, nights) {
        (Some(room_type), Some(name), Some(phone), Some(email), Some(check_in), Some(check_out), Some(guests), Some(nights)) => {
            Ok(ValidatedBooking {
                room_type,
                name,
                phone,
                email: email.to_lowercase(),
                check_in,
                check_out,
                guests,
                message: request.message,
                nights,
                total_price: room_type.nightly_rate() * f64::from(nights),
            })
        }
        _ => Err(vec![FieldError::new("request", "Booking request is incomplete")]),
    }
}

/// Trims every text field; blank values count as missing.
fn normalize(request: &BookingRequest) -> BookingRequest {
    fn clean(value: &Option<String>) -> Option<String> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
    }

    BookingRequest {
        room_type: clean(&request.room_type),
        name: clean(&request.name),
        phone: clean(&request.phone),
        email: clean(&request.email),
        check_in: clean(&request.check_in),
        check_out: clean(&request.check_out),
        guests: request.guests,
        message: clean(&request.message),
        malformed: request.malformed.clone(),
    }
}

fn field_errors(report: &ValidationErrors) -> Vec<FieldError> {
    report
        .field_errors()
        .into_iter()
        .flat_map(|(field, issues)| {
            let wire = wire_name(&field);
            issues.iter().map(move |issue| {
                let message = issue
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| issue.code.to_string());
                FieldError::new(wire, message)
            })
        })
        .collect()
}

fn wire_name(field: &str) -> &'static str {
    match field {
        "room_type" => "roomType",
        "name" => "name",
        "phone" => "phone",
        "email" => "email",
        "check_in" => "checkIn",
        "check_out" => "checkOut",
        "guests" => "guests",
        "message" => "message",
        _ => "request",
    }
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(FIELD_ORDER.len())
}

/// Accepts `YYYY-MM-DD` as sent by date inputs, or a full RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.contains('T') {
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_PATTERN.is_match(raw)
}

pub fn is_valid_email(raw: &str) -> bool {
    raw.validate_email() && has_dotted_domain(raw)
}

// "guest@localhost" passes the generic email rule but is not deliverable
fn has_dotted_domain(raw: &str) -> bool {
    match raw.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}
