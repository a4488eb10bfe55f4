//! Time helpers - millisecond timestamps at the API seam
//!
//! All datetime conversion happens in the handler layer; repositories and
//! the promotion engine only see `i64` Unix millis.

use super::{AppError, AppResult};

/// Current time as Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse an RFC 3339 datetime string into Unix millis
pub fn parse_rfc3339_millis(value: &str) -> AppResult<i64> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| AppError::validation(format!("Invalid datetime: {}", value)))
}
