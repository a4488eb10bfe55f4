//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Each repository is a
//! thin wrapper around [`BaseRepository`] with the table's invariants
//! enforced at write time.

// Marketing
pub mod announcement;
pub mod promotion;

// Content
pub mod hotel_service;
pub mod room;

// Re-exports
pub use announcement::AnnouncementRepository;
pub use hotel_service::HotelServiceRepository;
pub use promotion::PromotionRepository;
pub use room::RoomRepository;

use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use surrealdb::Surreal;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Delete refused because other records still reference this one
    #[error("Dependent records exist: {0}")]
    Dependent(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Validity windows must be ordered; both ends are inclusive so equality
/// is allowed.
pub fn check_window(starts_at: i64, ends_at: i64) -> RepoResult<()> {
    if starts_at > ends_at {
        return Err(RepoError::Validation(
            "starts_at must not be after ends_at".to_string(),
        ));
    }
    Ok(())
}

/// Strip a `"table:"` prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a record id from a table name and a (possibly prefixed) id
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("room", "room:abc"), "abc");
        assert_eq!(strip_table_prefix("room", "abc"), "abc");
        assert_eq!(strip_table_prefix("room", "roomette:abc"), "roomette:abc");
    }

    #[test]
    fn test_check_window_allows_equal_bounds() {
        assert!(check_window(100, 200).is_ok());
        assert!(check_window(100, 100).is_ok());
        assert!(check_window(200, 100).is_err());
    }
}
