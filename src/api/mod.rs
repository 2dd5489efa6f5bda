use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::NaiveDate;
use serde_json::json;
use tracing::error;

use crate::service::ServiceError;

pub mod documents;
pub mod emergency_contacts;
pub mod employees;
pub mod expiry;
pub mod inductions;
pub mod licenses;

/// Status derivation always receives "today" explicitly; the ambient clock is
/// read once here, at the boundary.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Translate a domain error into a stable error code. Raw datastore errors are
/// logged server-side and never echoed to the caller.
pub(crate) fn error_response(err: ServiceError) -> Response {
    let (status, message) = match &err {
        ServiceError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::InvariantViolation(_) => {
            crate::metrics::increment_invariant_violations();
            (StatusCode::CONFLICT, err.to_string())
        }
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Storage(db_err) => {
            error!("datastore failure: {}", db_err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "datastore unavailable".to_string(),
            )
        }
    };
    (
        status,
        Json(json!({"error": {"code": err.code(), "message": message}})),
    )
        .into_response()
}
