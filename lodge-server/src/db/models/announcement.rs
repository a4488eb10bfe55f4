//! Announcement Model
//!
//! Marketing banner/dialog shown on the public site. May carry a weak
//! reference to one promotion; the announcement never owns the promotion's
//! lifecycle.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

use super::serde_thing;

/// Announcement kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnouncementKind {
    #[default]
    Banner,
    Dialog,
}

/// Announcement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub kind: AnnouncementKind,
    /// Bound promotion (lookup-only back-reference)
    #[serde(default, with = "serde_thing::option")]
    pub promotion: Option<Thing>,
    /// Optional display window (Unix millis, inclusive)
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create announcement payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnouncementCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub body: Option<String>,
    pub kind: Option<AnnouncementKind>,
    /// Promotion id as a string ("promotion:xxx")
    pub promotion: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub sort_order: Option<i32>,
}

/// Update announcement payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnouncementUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub body: Option<String>,
    pub kind: Option<AnnouncementKind>,
    pub promotion: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
