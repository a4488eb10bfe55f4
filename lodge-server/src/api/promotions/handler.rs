//! Promotion API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{PromoScope, Promotion, PromotionCreate, PromotionUpdate};
use crate::db::repository::PromotionRepository;
use crate::promotions::{discount_label, CodeVerification, RedeemOutcome};
use crate::utils::time::now_millis;
use crate::utils::{ok, ok_with_message, AppError, AppResponse, AppResult};

fn parse_scope(value: &str) -> AppResult<PromoScope> {
    PromoScope::parse(value).ok_or_else(|| AppError::validation(format!("Invalid scope: {value}")))
}

/// GET /api/promotions - admin listing, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Promotion>>>> {
    let repo = PromotionRepository::new(state.get_db());
    let promotions = repo.find_all().await?;
    Ok(ok(promotions))
}

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    pub scope: Option<String>,
}

/// GET /api/promotions/active - currently eligible promotions for the
/// public pages, optionally narrowed by `?scope=`
pub async fn list_active(
    State(state): State<ServerState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<AppResponse<Vec<Promotion>>>> {
    let scope = query.scope.as_deref().map(parse_scope).transpose()?;
    let engine = state.promotion_engine();
    let promotions = engine.find_active(scope, now_millis()).await?;
    Ok(ok(promotions))
}

/// GET /api/promotions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Promotion>>> {
    let repo = PromotionRepository::new(state.get_db());
    let promotion = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Promotion {} not found", id)))?;
    Ok(ok(promotion))
}

/// POST /api/promotions
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PromotionCreate>,
) -> AppResult<Json<AppResponse<Promotion>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = PromotionRepository::new(state.get_db());
    let promotion = repo.create(payload).await?;
    Ok(ok(promotion))
}

/// PUT /api/promotions/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PromotionUpdate>,
) -> AppResult<Json<AppResponse<Promotion>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = PromotionRepository::new(state.get_db());
    let promotion = repo.update(&id, payload).await?;
    Ok(ok(promotion))
}

/// DELETE /api/promotions/{id} - refused while announcements reference it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = PromotionRepository::new(state.get_db());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub code: String,
    pub scope: Option<String>,
    /// When supplied, the response carries a quote against this price
    pub base_price: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct VerifyCodeResponse {
    pub valid: bool,
    /// Rejection reason when `valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Quote result; `applicable = false` with no price means the
    /// promotion cannot apply to the supplied base price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<i64>,
}

/// POST /api/promotions/verify-code - resolve a guest-entered code
pub async fn verify_code(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyCodeRequest>,
) -> AppResult<Json<AppResponse<VerifyCodeResponse>>> {
    let scope = payload.scope.as_deref().map(parse_scope).transpose()?;
    let engine = state.promotion_engine();

    let verification = engine.verify_code(&payload.code, scope, now_millis()).await?;
    let response = match verification {
        CodeVerification::Valid(promotion) => {
            let (applicable, discounted_price) = match payload.base_price {
                Some(base) => {
                    let quoted = engine.quote(&promotion, base);
                    (Some(quoted.is_some()), quoted)
                }
                None => (None, None),
            };
            VerifyCodeResponse {
                valid: true,
                reason: None,
                label: Some(discount_label(&promotion)),
                promotion: Some(*promotion),
                applicable,
                discounted_price,
            }
        }
        rejected => VerifyCodeResponse {
            valid: false,
            reason: rejected.reason(),
            promotion: None,
            label: None,
            applicable: None,
            discounted_price: None,
        },
    };

    Ok(ok(response))
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub base_price: i64,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub applicable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<i64>,
    pub label: String,
}

/// POST /api/promotions/{id}/quote - price a promotion against a base price
pub async fn quote(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<AppResponse<QuoteResponse>>> {
    if payload.base_price <= 0 {
        return Err(AppError::validation("base_price must be positive"));
    }

    let repo = PromotionRepository::new(state.get_db());
    let promotion = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Promotion {} not found", id)))?;

    let engine = state.promotion_engine();
    let discounted_price = engine.quote(&promotion, payload.base_price);
    Ok(ok(QuoteResponse {
        applicable: discounted_price.is_some(),
        discounted_price,
        label: discount_label(&promotion),
    }))
}

#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub redeemed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redemption_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

/// POST /api/promotions/{id}/redeem - called once per confirmed booking
/// that used this promotion
pub async fn redeem(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<RedeemResponse>>> {
    let engine = state.promotion_engine();
    match engine.redeem(&id).await? {
        RedeemOutcome::Redeemed { new_count } => Ok(ok(RedeemResponse {
            redeemed: true,
            redemption_count: Some(new_count),
            reason: None,
        })),
        RedeemOutcome::LimitReached => Ok(ok_with_message(
            RedeemResponse {
                redeemed: false,
                redemption_count: None,
                reason: Some("USAGE_LIMIT_REACHED"),
            },
            "This promotion is no longer available",
        )),
        RedeemOutcome::NotFound => {
            Err(AppError::not_found(format!("Promotion {} not found", id)))
        }
    }
}
