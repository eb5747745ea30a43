//! Validation gate for the booking and checkout forms.
//!
//! The gate runs synchronously before anything touches the store: it
//! returns the ordered set of invalid fields plus one aggregate message,
//! and editing a field clears only that field's error. Submission is
//! blocked while the set is non-empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Fill in all required fields.";
pub const SIZE_REQUIRED_MESSAGE: &str = "Select a size before checkout.";

/// One invalid field. `message` is set only when the field carries copy
/// more specific than the aggregate message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Ordered set of invalid fields, at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn add(&mut self, field: &str) {
        self.insert(field, None);
    }

    pub fn add_with_message(&mut self, field: &str, message: &str) {
        self.insert(field, Some(message.to_string()));
    }

    fn insert(&mut self, field: &str, message: Option<String>) {
        if self.contains(field) {
            return;
        }
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Optimistic clearing: editing a field drops its error without
    /// re-validating anything else.
    pub fn clear(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Aggregate message for display: the first field-specific message if
    /// any, otherwise the generic required-fields copy.
    pub fn message(&self) -> Option<String> {
        if self.is_clean() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .find_map(|e| e.message.clone())
                .unwrap_or_else(|| REQUIRED_FIELDS_MESSAGE.to_string()),
        )
    }
}

/// Which surface the booking came from. A portfolio call has no service
/// picker, so `service` is not required there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingContext {
    #[default]
    WorkWithMe,
    PortfolioCall,
}

/// Booking form fields as submitted. Everything arrives as text so the
/// gate, not the deserializer, decides what is invalid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSubmission {
    pub service: String,
    pub name: String,
    pub industry: String,
    pub other: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub agreement: bool,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub meeting_mode: String,
    pub context: BookingContext,
}

impl BookingSubmission {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// Checkout form fields as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSubmission {
    pub product_title: String,
    pub size: String,
    pub full_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub currency: String,
}

/// Validate a booking against "today" and the current `HH:MM` clock.
///
/// Beyond presence, the date must parse, must not lie in the past, and a
/// same-day time must not have passed already. These are the same rules
/// the calendar applies when the slot is picked.
pub fn validate_booking(
    submission: &BookingSubmission,
    today: NaiveDate,
    now: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let missing = |value: &str| value.trim().is_empty();

    if submission.context != BookingContext::PortfolioCall && missing(&submission.service) {
        errors.add("service");
    }
    if missing(&submission.name) {
        errors.add("name");
    }
    if missing(&submission.industry) {
        errors.add("industry");
    }
    if submission.industry.trim() == "Other" && missing(&submission.other) {
        errors.add("other");
    }
    if missing(&submission.email) {
        errors.add("email");
    }
    if missing(&submission.phone) {
        errors.add("phone");
    }
    if missing(&submission.message) {
        errors.add("message");
    }
    if !submission.agreement {
        errors.add("agreement");
    }

    if missing(&submission.date) {
        errors.add("date");
    } else {
        match submission.parsed_date() {
            Some(date) if schedule::is_selectable(today, date) => {}
            _ => errors.add("date"),
        }
    }

    if missing(&submission.time) {
        errors.add("time");
    } else if !schedule::is_valid_slot(submission.time.trim()) {
        errors.add("time");
    } else if let Some(date) = submission.parsed_date() {
        if schedule::should_clear_time(date, submission.time.trim(), today, now) {
            errors.add("time");
        }
    }

    if missing(&submission.timezone) {
        errors.add("timezone");
    }
    if missing(&submission.meeting_mode) {
        errors.add("meeting_mode");
    }

    errors
}

/// Validate a checkout. The missing-size case carries its own message and
/// takes priority in the aggregate.
pub fn validate_checkout(submission: &CheckoutSubmission) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let missing = |value: &str| value.trim().is_empty();

    if missing(&submission.size) {
        errors.add_with_message("size", SIZE_REQUIRED_MESSAGE);
    }
    if missing(&submission.full_name) {
        errors.add("full_name");
    }
    if missing(&submission.address) {
        errors.add("address");
    }
    if missing(&submission.email) {
        errors.add("email");
    }
    if missing(&submission.phone) {
        errors.add("phone");
    }

    errors
}

/// Per-form submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Rejected,
    Submitting,
    Submitted,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitEvent {
    /// User hit submit; validation starts.
    Submit,
    /// Validation found errors.
    Reject,
    /// Validation passed; the write begins.
    Accept,
    /// The write landed.
    Succeed,
    /// The write failed; the draft survives for retry.
    Fail,
    /// Error or confirmation acknowledged.
    Reset,
}

impl SubmitState {
    /// Step the lifecycle. Events that are illegal in the current state
    /// leave it unchanged.
    pub fn advance(self, event: SubmitEvent) -> SubmitState {
        use SubmitEvent::*;
        use SubmitState::*;
        match (self, event) {
            (Idle, Submit) => Validating,
            (Validating, Reject) => Rejected,
            (Validating, Accept) => Submitting,
            (Submitting, Succeed) => Submitted,
            (Submitting, Fail) => Failed,
            (Rejected | Submitted | Failed, Reset) => Idle,
            (state, _) => state,
        }
    }

    /// While validating or writing, the submit control stays disabled.
    pub fn blocks_submission(&self) -> bool {
        matches!(self, SubmitState::Validating | SubmitState::Submitting)
    }
}
