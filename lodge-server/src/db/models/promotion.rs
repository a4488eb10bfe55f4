//! Promotion Model
//!
//! A time-bounded discount campaign: percentage or fixed-amount, optionally
//! restricted to a booking scope and/or gated by a redemption code.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use validator::Validate;

use super::serde_thing;

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

/// Booking scope enum - what category of bookable item a promotion targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoScope {
    All,
    Room,
    Service,
    Activity,
    Event,
}

impl PromoScope {
    /// Parse a scope path/query segment (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "ROOM" => Some(Self::Room),
            "SERVICE" => Some(Self::Service),
            "ACTIVITY" => Some(Self::Activity),
            "EVENT" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Promotion entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub name: String,
    #[serde(default = "default_discount_type")]
    pub discount_type: DiscountType,
    /// Percentage points (PERCENTAGE) or whole-franc amount (FIXED_AMOUNT)
    pub value: f64,
    #[serde(default = "default_scope")]
    pub scope: PromoScope,
    /// Target room, only meaningful when `scope = ROOM`
    #[serde(default, with = "serde_thing::option")]
    pub target_room: Option<Thing>,
    /// Target service, only meaningful when `scope = SERVICE`
    #[serde(default, with = "serde_thing::option")]
    pub target_service: Option<Thing>,
    /// Redemption code, stored uppercase, unique across promotions
    pub code: Option<String>,
    /// Validity window (Unix millis, inclusive on both ends)
    pub starts_at: i64,
    pub ends_at: i64,
    /// Floor on the base price for eligibility (whole francs)
    pub minimum_amount: Option<i64>,
    /// Cap on total uses across all guests
    pub max_redemptions: Option<i64>,
    /// Per-guest cap. Carried for the admin surface; not enforced - the
    /// engine has no guest-identity concept.
    #[serde(default = "default_per_customer")]
    pub max_redemptions_per_customer: i64,
    #[serde(default)]
    pub redemption_count: i64,
    /// Manual kill-switch, independent of the date window
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Free-text conditions shown to the guest
    pub terms: Option<String>,
    #[serde(default, with = "serde_thing::option")]
    pub created_by: Option<Thing>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_discount_type() -> DiscountType {
    DiscountType::Percentage
}

fn default_scope() -> PromoScope {
    PromoScope::All
}

fn default_per_customer() -> i64 {
    1
}

/// Create promotion payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromotionCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub discount_type: Option<DiscountType>,
    #[validate(range(exclusive_min = 0.0))]
    pub value: f64,
    pub scope: Option<PromoScope>,
    /// Target ids as strings ("room:xxx" / "hotel_service:xxx")
    pub target_room: Option<String>,
    pub target_service: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub code: Option<String>,
    pub starts_at: i64,
    pub ends_at: i64,
    #[validate(range(min = 1))]
    pub minimum_amount: Option<i64>,
    #[validate(range(min = 1))]
    pub max_redemptions: Option<i64>,
    #[validate(range(min = 1))]
    pub max_redemptions_per_customer: Option<i64>,
    #[validate(length(max = 2000))]
    pub terms: Option<String>,
    pub created_by: Option<String>,
}

/// Update promotion payload (all optional, merge semantics)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromotionUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub discount_type: Option<DiscountType>,
    #[validate(range(exclusive_min = 0.0))]
    pub value: Option<f64>,
    pub scope: Option<PromoScope>,
    pub target_room: Option<String>,
    pub target_service: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub code: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    #[validate(range(min = 1))]
    pub minimum_amount: Option<i64>,
    #[validate(range(min = 1))]
    pub max_redemptions: Option<i64>,
    #[validate(range(min = 1))]
    pub max_redemptions_per_customer: Option<i64>,
    #[validate(length(max = 2000))]
    pub terms: Option<String>,
    pub is_active: Option<bool>,
}

impl Promotion {
    /// Promotion id as a `"promotion:xxx"` string, empty when unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
