//! JSON bodies shared by the API routes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use tracing::{debug, error};

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// `{"error": message}` with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// `{"message": message}` with status 200.
pub fn message_response(message: &str) -> Response {
    Json(json!({ "message": message })).into_response()
}

/// Logs the failure and answers 500 without leaking its details.
pub fn internal_error(context: &str, err: impl Display) -> Response {
    error!("{}: {}", context, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn bad_body(rejection: JsonRejection) -> Response {
    debug!("Rejected request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
}

/// Ids in paths are database row ids. Anything that does not parse as one
/// cannot name an existing row.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}
