//! Announcement API Handlers
//!
//! The public listing resolves each announcement's bound promotion and
//! attaches a display block only while that promotion is currently
//! eligible.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    Announcement, AnnouncementCreate, AnnouncementKind, AnnouncementUpdate, Promotion,
};
use crate::db::repository::{AnnouncementRepository, PromotionRepository};
use crate::promotions::{discount_label, is_currently_eligible};
use crate::utils::time::now_millis;
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/announcements - admin listing
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Announcement>>>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let announcements = repo.find_all().await?;
    Ok(ok(announcements))
}

/// Promotion block rendered inside a public announcement
#[derive(Debug, Serialize)]
pub struct PromotionDisplay {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    pub ends_at: i64,
}

impl PromotionDisplay {
    fn from_promotion(promotion: &Promotion) -> Self {
        Self {
            id: promotion.id_string(),
            name: promotion.name.clone(),
            label: discount_label(promotion),
            code: promotion.code.clone(),
            terms: promotion.terms.clone(),
            ends_at: promotion.ends_at,
        }
    }
}

/// Public view of an announcement
#[derive(Debug, Serialize)]
pub struct AnnouncementDisplay {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub kind: AnnouncementKind,
    pub sort_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionDisplay>,
}

/// GET /api/announcements/active - public listing with resolved promotions
pub async fn list_active(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<AnnouncementDisplay>>>> {
    let now = now_millis();
    let repo = AnnouncementRepository::new(state.get_db());
    let promo_repo = PromotionRepository::new(state.get_db());

    let announcements = repo.find_active(now).await?;
    let mut displays = Vec::with_capacity(announcements.len());

    for announcement in announcements {
        let promotion = match &announcement.promotion {
            Some(thing) => promo_repo
                .find_by_id(&thing.to_string())
                .await?
                .filter(|p| is_currently_eligible(p, now))
                .map(|p| PromotionDisplay::from_promotion(&p)),
            None => None,
        };

        displays.push(AnnouncementDisplay {
            id: announcement
                .id
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            title: announcement.title,
            body: announcement.body,
            kind: announcement.kind,
            sort_order: announcement.sort_order,
            promotion,
        });
    }

    Ok(ok(displays))
}

/// GET /api/announcements/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Announcement>>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Announcement {} not found", id)))?;
    Ok(ok(announcement))
}

/// POST /api/announcements
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AnnouncementCreate>,
) -> AppResult<Json<AppResponse<Announcement>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.create(payload).await?;
    Ok(ok(announcement))
}

/// PUT /api/announcements/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AnnouncementUpdate>,
) -> AppResult<Json<AppResponse<Announcement>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.update(&id, payload).await?;
    Ok(ok(announcement))
}

/// POST /api/announcements/{id}/unbind-promotion - drop the promotion
/// reference so the promotion itself can be deleted
pub async fn unbind_promotion(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Announcement>>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.unbind_promotion(&id).await?;
    Ok(ok(announcement))
}

/// DELETE /api/announcements/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
