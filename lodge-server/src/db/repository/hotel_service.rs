//! Hotel Service Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{make_thing, strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{HotelService, HotelServiceCreate, HotelServiceUpdate};
use crate::utils::slug::{dedupe_slug, slugify};
use crate::utils::time::now_millis;

const TABLE: &str = "hotel_service";

/// Merge payload for UPDATE - only set fields are written back
#[derive(Debug, Serialize)]
struct HotelServiceMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct HotelServiceRepository {
    base: BaseRepository,
}

impl HotelServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active services ordered for the public page
    pub async fn find_all(&self) -> RepoResult<Vec<HotelService>> {
        let services: Vec<HotelService> = self
            .base
            .db()
            .query("SELECT * FROM hotel_service WHERE is_active = true ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find service by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<HotelService>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let service: Option<HotelService> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(service)
    }

    /// Find service by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<HotelService>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM hotel_service WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let services: Vec<HotelService> = result.take(0)?;
        Ok(services.into_iter().next())
    }

    /// Create a new service with a generated slug
    pub async fn create(&self, data: HotelServiceCreate) -> RepoResult<HotelService> {
        let now = now_millis();
        let mut slug = slugify(&data.name);
        if self.find_by_slug(&slug).await?.is_some() {
            slug = dedupe_slug(&slug, now);
        }

        let service = HotelService {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image,
            is_active: true,
            sort_order: data.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        let created: Option<HotelService> = self.base.db().create(TABLE).content(service).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create hotel service".to_string()))
    }

    /// Update a service (merge semantics)
    pub async fn update(&self, id: &str, data: HotelServiceUpdate) -> RepoResult<HotelService> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Hotel service {} not found", id)))?;

        let merge = HotelServiceMerge {
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image: data.image,
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
            .ok_or_else(|| RepoError::NotFound(format!("Hotel service {} not found", id)))
    }

    /// Hard delete a service, refused while promotions still target it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM promotion WHERE target_service = $service GROUP ALL")
            .bind(("service", thing.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Dependent(
                "Cannot delete a service still targeted by promotions".to_string(),
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
