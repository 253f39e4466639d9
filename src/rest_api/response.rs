//! Terminal outcomes for location requests.
//!
//! Every request resolves to exactly one of these categories. The status
//! code and body per category are fixed and part of the HTTP contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// The closed set of request outcomes.
///
/// Handlers return these as ordinary values. Bad input and storage
/// failures are expected conditions here, not handler errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocResponse {
    /// The operation completed; body carries the record or a confirmation.
    Ok(String),
    /// The client supplied a malformed coordinate string or record.
    BadInput(String),
    /// The referenced record does not exist.
    NotFound(String),
    /// Insert of an id already present. Informational, not a failure.
    Duplicate(String),
    /// The backend could not be reached.
    Unavailable,
    /// The backend reported a failure; its text is preserved in the body.
    Failed(String),
}

impl LocResponse {
    /// HTTP status for this outcome.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LocResponse::Ok(_) => StatusCode::OK,
            LocResponse::BadInput(_) => StatusCode::BAD_REQUEST,
            LocResponse::NotFound(_) => StatusCode::NOT_FOUND,
            LocResponse::Duplicate(_) => StatusCode::ALREADY_REPORTED,
            LocResponse::Unavailable => StatusCode::FAILED_DEPENDENCY,
            LocResponse::Failed(_) => StatusCode::FAILED_DEPENDENCY,
        }
    }

    /// Response body for this outcome.
    pub fn body(&self) -> &str {
        match self {
            LocResponse::Ok(body)
            | LocResponse::BadInput(body)
            | LocResponse::NotFound(body)
            | LocResponse::Duplicate(body)
            | LocResponse::Failed(body) => body,
            LocResponse::Unavailable => "MongoDB not available",
        }
    }
}

impl IntoResponse for LocResponse {
    fn into_response(self) -> Response {
        (self.status_code(), self.body().to_string()).into_response()
    }
}
