use serde::Deserialize;

use crate::error::AppError;

/// Error body the backend sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turn a non-success response into an [`AppError::Server`].
///
/// The backend's own `message` is preferred when the body carries one.
pub fn error_from_status(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| default_message(status).to_string());

    AppError::Server { status, message }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Not authorized",
        403 => "Forbidden",
        404 => "Not found",
        500..=599 => "Backend unavailable",
        _ => "Unexpected response",
    }
}
