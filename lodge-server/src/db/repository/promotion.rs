//! Promotion Repository
//!
//! Write-time invariants enforced here: code normalization and
//! case-insensitive uniqueness, window ordering, scope/target coherence,
//! and the delete guard against announcements still referencing a
//! promotion. The redemption counter is incremented with a single
//! conditional UPDATE so concurrent redemptions near the cap cannot both
//! take the last slot.

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{check_window, make_thing, strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiscountType, PromoScope, Promotion, PromotionCreate, PromotionUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "promotion";

/// Normalize a redemption code for storage and lookup
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Merge payload for UPDATE - only set fields are written back
#[derive(Debug, Serialize)]
struct PromotionMerge {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<PromoScope>,
    // Reference fields are stored in their "table:id" string form, the
    // same representation the entity structs serialize to on create
    #[serde(skip_serializing_if = "Option::is_none")]
    target_room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    starts_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_redemptions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_redemptions_per_customer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all promotions (admin listing), newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Promotion>> {
        let promotions: Vec<Promotion> = self
            .base
            .db()
            .query("SELECT * FROM promotion ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(promotions)
    }

    /// Find promotions that are currently eligible: active, inside their
    /// inclusive validity window, with redemptions remaining.
    ///
    /// When a scope is requested, ALL-scoped promotions match alongside the
    /// requested scope. Ordered by descending raw `value` - percentage and
    /// fixed-amount promotions sort on the same axis, matching the ordering
    /// the site has always displayed.
    pub async fn find_active(
        &self,
        scope: Option<PromoScope>,
        now_ms: i64,
    ) -> RepoResult<Vec<Promotion>> {
        let query = match scope {
            Some(_) => {
                "SELECT * FROM promotion \
                 WHERE is_active = true \
                   AND starts_at <= $now AND ends_at >= $now \
                   AND (max_redemptions = NONE OR redemption_count < max_redemptions) \
                   AND (scope = 'ALL' OR scope = $scope) \
                 ORDER BY value DESC"
            }
            None => {
                "SELECT * FROM promotion \
                 WHERE is_active = true \
                   AND starts_at <= $now AND ends_at >= $now \
                   AND (max_redemptions = NONE OR redemption_count < max_redemptions) \
                 ORDER BY value DESC"
            }
        };

        let mut q = self.base.db().query(query).bind(("now", now_ms));
        if let Some(s) = scope {
            q = q.bind(("scope", s));
        }
        let promotions: Vec<Promotion> = q.await?.take(0)?;
        Ok(promotions)
    }

    /// Find promotion by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Promotion>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let promotion: Option<Promotion> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(promotion)
    }

    /// Find promotion by redemption code. Input is normalized before lookup
    /// and codes are stored uppercase, so the match is case-insensitive.
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Promotion>> {
        let normalized = normalize_code(code);
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM promotion WHERE code = $code LIMIT 1")
            .bind(("code", normalized))
            .await?;
        let promotions: Vec<Promotion> = result.take(0)?;
        Ok(promotions.into_iter().next())
    }

    /// Create a new promotion
    pub async fn create(&self, data: PromotionCreate) -> RepoResult<Promotion> {
        check_window(data.starts_at, data.ends_at)?;

        let scope = data.scope.unwrap_or(PromoScope::All);
        check_scope_targets(scope, &data.target_room, &data.target_service)?;

        let code = match &data.code {
            Some(raw) => {
                let normalized = normalize_code(raw);
                if self.find_by_code(&normalized).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Promotion code '{}' already exists",
                        normalized
                    )));
                }
                Some(normalized)
            }
            None => None,
        };

        let now = now_millis();
        let promotion = Promotion {
            id: None,
            name: data.name,
            discount_type: data.discount_type.unwrap_or(DiscountType::Percentage),
            value: data.value,
            scope,
            target_room: data.target_room.as_deref().map(|id| make_thing("room", id)),
            target_service: data
                .target_service
                .as_deref()
                .map(|id| make_thing("hotel_service", id)),
            code,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            minimum_amount: data.minimum_amount,
            max_redemptions: data.max_redemptions,
            max_redemptions_per_customer: data.max_redemptions_per_customer.unwrap_or(1),
            redemption_count: 0,
            is_active: true,
            terms: data.terms,
            created_by: data.created_by.as_deref().map(|id| make_thing("user", id)),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Promotion> = self.base.db().create(TABLE).content(promotion).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create promotion".to_string()))
    }

    /// Update a promotion (merge semantics).
    ///
    /// Targets supplied in the update are validated against the merged
    /// scope; targets left over from a previous scope are cleared when the
    /// scope moves away from them.
    pub async fn update(&self, id: &str, data: PromotionUpdate) -> RepoResult<Promotion> {
        let pure_id = strip_table_prefix(TABLE, id);
        let existing = self
            .find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))?;

        // Validate the effective window after the merge
        let starts_at = data.starts_at.unwrap_or(existing.starts_at);
        let ends_at = data.ends_at.unwrap_or(existing.ends_at);
        check_window(starts_at, ends_at)?;

        let scope = data.scope.unwrap_or(existing.scope);
        check_scope_targets(scope, &data.target_room, &data.target_service)?;

        // Normalize and re-check a changed code
        let code = match &data.code {
            Some(raw) => {
                let normalized = normalize_code(raw);
                if existing.code.as_deref() != Some(normalized.as_str())
                    && self.find_by_code(&normalized).await?.is_some()
                {
                    return Err(RepoError::Duplicate(format!(
                        "Promotion code '{}' already exists",
                        normalized
                    )));
                }
                Some(normalized)
            }
            None => None,
        };

        let merge = PromotionMerge {
            name: data.name,
            discount_type: data.discount_type,
            value: data.value,
            scope: data.scope,
            target_room: data
                .target_room
                .as_deref()
                .map(|id| make_thing("room", id).to_string()),
            target_service: data
                .target_service
                .as_deref()
                .map(|id| make_thing("hotel_service", id).to_string()),
            code,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            minimum_amount: data.minimum_amount,
            max_redemptions: data.max_redemptions,
            max_redemptions_per_customer: data.max_redemptions_per_customer,
            terms: data.terms,
            is_active: data.is_active,
            updated_at: now_millis(),
        };

        let thing = make_thing(TABLE, pure_id);
        let mut query = String::from("UPDATE $thing MERGE $data;");
        if scope != PromoScope::Room && existing.target_room.is_some() {
            query.push_str(" UPDATE $thing SET target_room = NONE;");
        }
        if scope != PromoScope::Service && existing.target_service.is_some() {
            query.push_str(" UPDATE $thing SET target_service = NONE;");
        }
        self.base
            .db()
            .query(query)
            .bind(("thing", thing))
            .bind(("data", merge))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))
    }

    /// Hard delete a promotion, refused while announcements still reference it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM announcement WHERE promotion = $promo GROUP ALL")
            .bind(("promo", thing.to_string()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Dependent(
                "Cannot delete a promotion still referenced by announcements".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// Increment the redemption counter if a slot remains.
    ///
    /// The cap check and the increment are one storage statement, so two
    /// concurrent redemptions with a single slot left can never both
    /// succeed. Returns the updated promotion, or `None` when the record
    /// exists but the cap is reached - the caller distinguishes that from
    /// a missing record.
    pub async fn try_increment_redemptions(&self, id: &str) -> RepoResult<Option<Promotion>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET redemption_count += 1, updated_at = $now \
                 WHERE max_redemptions = NONE OR redemption_count < max_redemptions \
                 RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("now", now))
            .await?;
        let updated: Vec<Promotion> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}

/// Targets are only meaningful for their own scope; ALL carries none.
fn check_scope_targets(
    scope: PromoScope,
    target_room: &Option<String>,
    target_service: &Option<String>,
) -> RepoResult<()> {
    let room_ok = target_room.is_none() || scope == PromoScope::Room;
    let service_ok = target_service.is_none() || scope == PromoScope::Service;
    if !room_ok || !service_ok {
        return Err(RepoError::Validation(format!(
            "Target does not match promotion scope {:?}",
            scope
        )));
    }
    Ok(())
}
