pub mod booking_service;
pub mod lifecycle;
pub mod reference;
pub mod validation;
