//! Table reservation requests.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Times a table can be booked for, as offered by the reservation form.
pub const RESERVATION_TIME_SLOTS: [&str; 10] = [
    "09:00", "10:00", "11:00", "12:00", "01:00", "02:00", "03:00", "04:00", "05:00", "06:00",
];

/// Errors returned by [`ReservationRequest::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// The guest name is blank.
    #[error("name cannot be empty")]
    MissingName,
    /// The email is blank.
    #[error("email cannot be empty")]
    MissingEmail,
    /// The email is not `local@domain` without whitespace.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// The requested date is before today.
    #[error("reservation date {date} is in the past")]
    DateInPast {
        /// Requested date.
        date: NaiveDate,
    },
    /// No time slot was chosen.
    #[error("a time slot must be selected")]
    MissingTimeSlot,
    /// The time slot is not one of [`RESERVATION_TIME_SLOTS`].
    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),
}

/// A table booking as entered on the reservation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
    pub time_slot: String,
    /// Party size, never below one.
    pub guests: NonZeroU32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_requests: String,
}

impl ReservationRequest {
    /// Default party size on the form.
    pub const DEFAULT_GUESTS: NonZeroU32 = match NonZeroU32::new(2) {
        Some(n) => n,
        None => NonZeroU32::MIN,
    };

    /// Create a request for two guests with no phone or special requests.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        date: NaiveDate,
        time_slot: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date,
            time_slot: time_slot.into(),
            guests: Self::DEFAULT_GUESTS,
            phone: String::new(),
            special_requests: String::new(),
        }
    }

    /// Set the party size.
    #[must_use]
    pub const fn with_guests(mut self, guests: NonZeroU32) -> Self {
        self.guests = guests;
        self
    }

    /// Set a contact number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set free-text special requests.
    #[must_use]
    pub fn with_special_requests(mut self, text: impl Into<String>) -> Self {
        self.special_requests = text.into();
        self
    }

    /// One more guest.
    pub fn add_guest(&mut self) {
        self.guests = self.guests.saturating_add(1);
    }

    /// One fewer guest. Stops at one.
    pub fn remove_guest(&mut self) {
        self.guests = NonZeroU32::new(self.guests.get() - 1).unwrap_or(NonZeroU32::MIN);
    }

    /// Check the request against `today`.
    ///
    /// Fields are checked in form order: name, email, date, time slot.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ReservationError> {
        if self.name.trim().is_empty() {
            return Err(ReservationError::MissingName);
        }
        validate_email(&self.email)?;
        if self.date < today {
            return Err(ReservationError::DateInPast { date: self.date });
        }
        let slot = self.time_slot.trim();
        if slot.is_empty() {
            return Err(ReservationError::MissingTimeSlot);
        }
        if !RESERVATION_TIME_SLOTS.contains(&slot) {
            return Err(ReservationError::UnknownTimeSlot(slot.to_owned()));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ReservationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ReservationError::MissingEmail);
    }
    let valid = !email.chars().any(char::is_whitespace)
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if valid {
        Ok(())
    } else {
        Err(ReservationError::InvalidEmail(email.to_owned()))
    }
}
