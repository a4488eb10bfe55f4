//! Hotel Service Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

use super::serde_thing;

/// Hotel service entity (spa, restaurant, excursions, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelService {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub name: String,
    /// URL slug, unique per service
    pub slug: String,
    pub description: Option<String>,
    /// Price in whole francs
    pub price: i64,
    /// Free-text category label ("WELLNESS", "DINING", ...)
    pub category: Option<String>,
    pub image: Option<String>,
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

/// Create hotel service payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HotelServiceCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub price: i64,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update hotel service payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HotelServiceUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub price: Option<i64>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
