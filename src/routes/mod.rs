/**
 * Routes Module
 * API route handlers
 */

pub mod auth;
pub mod content;
pub mod health;
pub mod orders;
pub mod schedule;
pub mod sitemap;
pub mod work_requests;

use serde::Serialize;

use crate::content::validate::{FieldErrors, SubmitState};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }
}

/// Success response (for status updates and deletes)
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Envelope for a form submission the gate or the store turned away
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRejection {
    pub error: String,
    #[serde(skip_serializing_if = "FieldErrors::is_clean")]
    pub field_errors: FieldErrors,
    pub state: SubmitState,
}
