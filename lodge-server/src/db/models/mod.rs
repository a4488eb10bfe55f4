//! Database Models

pub mod serde_thing;

// Content
pub mod hotel_service;
pub mod room;

// Marketing
pub mod announcement;
pub mod promotion;

// Re-exports
pub use announcement::{Announcement, AnnouncementCreate, AnnouncementKind, AnnouncementUpdate};
pub use hotel_service::{HotelService, HotelServiceCreate, HotelServiceUpdate};
pub use promotion::{DiscountType, PromoScope, Promotion, PromotionCreate, PromotionUpdate};
pub use room::{Room, RoomCreate, RoomUpdate};
