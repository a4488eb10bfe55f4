//! Announcement Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use surrealdb::Surreal;

use super::{check_window, make_thing, strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Announcement, AnnouncementCreate, AnnouncementKind, AnnouncementUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "announcement";

/// Merge payload for UPDATE - only set fields are written back
#[derive(Debug, Serialize)]
struct AnnouncementMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<AnnouncementKind>,
    // Stored in "table:id" string form, matching the create path
    #[serde(skip_serializing_if = "Option::is_none")]
    promotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starts_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct AnnouncementRepository {
    base: BaseRepository,
}

impl AnnouncementRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all announcements (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Announcement>> {
        let announcements: Vec<Announcement> = self
            .base
            .db()
            .query("SELECT * FROM announcement ORDER BY sort_order, created_at DESC")
            .await?
            .take(0)?;
        Ok(announcements)
    }

    /// Find announcements currently displayable on the public site:
    /// active, and inside their display window when one is set.
    pub async fn find_active(&self, now_ms: i64) -> RepoResult<Vec<Announcement>> {
        let announcements: Vec<Announcement> = self
            .base
            .db()
            .query(
                "SELECT * FROM announcement \
                 WHERE is_active = true \
                   AND (starts_at = NONE OR starts_at <= $now) \
                   AND (ends_at = NONE OR ends_at >= $now) \
                 ORDER BY sort_order, created_at DESC",
            )
            .bind(("now", now_ms))
            .await?
            .take(0)?;
        Ok(announcements)
    }

    /// Find announcement by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Announcement>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let announcement: Option<Announcement> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(announcement)
    }

    /// Create a new announcement. A bound promotion must exist.
    pub async fn create(&self, data: AnnouncementCreate) -> RepoResult<Announcement> {
        if let (Some(starts), Some(ends)) = (data.starts_at, data.ends_at) {
            check_window(starts, ends)?;
        }

        let promotion = match &data.promotion {
            Some(id) => Some(self.resolve_promotion_ref(id).await?),
            None => None,
        };

        let now = now_millis();
        let announcement = Announcement {
            id: None,
            title: data.title,
            body: data.body,
            kind: data.kind.unwrap_or_default(),
            promotion,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            is_active: true,
            sort_order: data.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Announcement> =
            self.base.db().create(TABLE).content(announcement).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create announcement".to_string()))
    }

    /// Update an announcement (merge semantics)
    pub async fn update(&self, id: &str, data: AnnouncementUpdate) -> RepoResult<Announcement> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Announcement {} not found", id)))?;

        let starts_at = data.starts_at.or(existing.starts_at);
        let ends_at = data.ends_at.or(existing.ends_at);
        if let (Some(starts), Some(ends)) = (starts_at, ends_at) {
            check_window(starts, ends)?;
        }

        let promotion = match &data.promotion {
            Some(id) => Some(self.resolve_promotion_ref(id).await?.to_string()),
            None => None,
        };

        let merge = AnnouncementMerge {
            title: data.title,
            body: data.body,
            kind: data.kind,
            promotion,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
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
            .ok_or_else(|| RepoError::NotFound(format!("Announcement {} not found", id)))
    }

    /// Unbind the promotion from an announcement
    pub async fn unbind_promotion(&self, id: &str) -> RepoResult<Announcement> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET promotion = NONE, updated_at = $now")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Announcement {} not found", id)))
    }

    /// Hard delete an announcement
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Check the referenced promotion exists and return its record id
    async fn resolve_promotion_ref(&self, id: &str) -> RepoResult<Thing> {
        let thing = make_thing("promotion", id);
        let found: Option<crate::db::models::Promotion> = self
            .base
            .db()
            .select(("promotion", thing.id.to_raw()))
            .await?;
        if found.is_none() {
            return Err(RepoError::Validation(format!(
                "Promotion {} does not exist",
                id
            )));
        }
        Ok(thing)
    }
}
