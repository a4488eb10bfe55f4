//! Room Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

use super::serde_thing;

/// Room entity - a bookable room shown on the public site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub name: String,
    /// URL slug, unique per room
    pub slug: String,
    pub description: Option<String>,
    /// Nightly rate in whole francs
    pub price_per_night: i64,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Upload paths; storage itself lives outside this service
    #[serde(default)]
    pub images: Vec<String>,
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

fn default_capacity() -> i32 {
    2
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoomCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub price_per_night: i64,
    #[validate(range(min = 1, max = 20))]
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoomUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub price_per_night: Option<i64>,
    #[validate(range(min = 1, max = 20))]
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
