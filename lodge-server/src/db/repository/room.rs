//! Room Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{make_thing, strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::utils::slug::{dedupe_slug, slugify};
use crate::utils::time::now_millis;

const TABLE: &str = "room";

/// Merge payload for UPDATE - only set fields are written back.
/// Slugs stay stable across renames so public links keep working.
#[derive(Debug, Serialize)]
struct RoomMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_per_night: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active rooms ordered for the public page
    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room WHERE is_active = true ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    /// Find room by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let room: Option<Room> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(room)
    }

    /// Find room by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Room>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    /// Create a new room with a generated slug
    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        let now = now_millis();
        let mut slug = slugify(&data.name);
        if self.find_by_slug(&slug).await?.is_some() {
            slug = dedupe_slug(&slug, now);
        }

        let room = Room {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            price_per_night: data.price_per_night,
            capacity: data.capacity.unwrap_or(2),
            amenities: data.amenities.unwrap_or_default(),
            images: data.images.unwrap_or_default(),
            is_active: true,
            sort_order: data.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// Update a room (merge semantics)
    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        let merge = RoomMerge {
            name: data.name,
            description: data.description,
            price_per_night: data.price_per_night,
            capacity: data.capacity,
            amenities: data.amenities,
            images: data.images,
            sort_order: data.sort_order,
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", merge))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    /// Hard delete a room, refused while promotions still target it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM promotion WHERE target_room = $room GROUP ALL")
            .bind(("room", thing.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Dependent(
                "Cannot delete a room still targeted by promotions".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
