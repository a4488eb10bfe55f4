//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - application error and response envelope
//! - [`AppResult`] - handler result alias
//! - logging, slug, time and validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod slug;
pub mod time;

pub use error::{ok, ok_with_message, AppError, AppResponse};
pub use result::AppResult;
