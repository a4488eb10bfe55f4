//! Promotion Engine
//!
//! Facade over the promotion repository and the pure eligibility/calculator
//! functions. Evaluation re-reads current state on every call - stale promo
//! data is worse than a few extra reads at this request volume.

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::models::{PromoScope, Promotion};
use crate::db::repository::{PromotionRepository, RepoResult};

use super::calculator::{discounted_price, meets_minimum};
use super::eligibility::{is_currently_eligible, is_within_window, matches_scope};

/// Outcome of verifying a guest-entered redemption code.
///
/// All rejections are expected, user-facing results - never errors. The
/// exhausted case is distinguished so the guest can be told the campaign
/// ran out rather than that their code is wrong.
#[derive(Debug, Clone)]
pub enum CodeVerification {
    Valid(Box<Promotion>),
    NotFound,
    ExpiredOrInactive,
    Exhausted,
}

impl CodeVerification {
    /// Stable reason string for API payloads and user messaging
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            CodeVerification::Valid(_) => None,
            CodeVerification::NotFound => Some("CODE_NOT_FOUND"),
            CodeVerification::ExpiredOrInactive => Some("CODE_EXPIRED_OR_INACTIVE"),
            CodeVerification::Exhausted => Some("CODE_EXHAUSTED"),
        }
    }
}

/// Outcome of a redemption attempt. Hitting the cap is a normal negative
/// result surfaced as "this promo is no longer available", not a failure
/// needing operator attention.
#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    Redeemed { new_count: i64 },
    LimitReached,
    NotFound,
}

/// Promotion Engine - eligibility evaluation, quoting, redemption
#[derive(Clone)]
pub struct PromotionEngine {
    repo: PromotionRepository,
}

impl PromotionEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: PromotionRepository::new(db),
        }
    }

    /// Currently eligible promotions, optionally narrowed to a scope,
    /// largest raw value first.
    pub async fn find_active(
        &self,
        scope: Option<PromoScope>,
        now_ms: i64,
    ) -> RepoResult<Vec<Promotion>> {
        self.repo.find_active(scope, now_ms).await
    }

    /// Look up a guest-entered code and run the eligibility predicate
    /// against it.
    ///
    /// A scope mismatch reads as "expired or inactive" to the guest - the
    /// code exists but does not apply where they are trying to use it.
    /// Exhaustion is only reported when the cap is specifically the
    /// blocking condition.
    pub async fn verify_code(
        &self,
        code: &str,
        scope: Option<PromoScope>,
        now_ms: i64,
    ) -> RepoResult<CodeVerification> {
        let promotion = match self.repo.find_by_code(code).await? {
            Some(p) => p,
            None => return Ok(CodeVerification::NotFound),
        };

        if !promotion.is_active || !is_within_window(&promotion, now_ms) {
            return Ok(CodeVerification::ExpiredOrInactive);
        }
        if !matches_scope(&promotion, scope) {
            return Ok(CodeVerification::ExpiredOrInactive);
        }
        if !is_currently_eligible(&promotion, now_ms) {
            // Active and in-window, so the cap is what blocked it
            return Ok(CodeVerification::Exhausted);
        }

        Ok(CodeVerification::Valid(Box::new(promotion)))
    }

    /// Quote a discounted price for a base price under a promotion.
    /// `None` means the promotion is not applicable to this price
    /// (below the minimum, or a fixed discount that would consume it).
    pub fn quote(&self, promotion: &Promotion, base_price: i64) -> Option<i64> {
        if !meets_minimum(promotion, base_price) {
            return None;
        }
        discounted_price(base_price, promotion)
    }

    /// Redeem one slot of a promotion.
    ///
    /// The counter re-check and the increment happen in a single storage
    /// statement (see the repository), so eligibility checked earlier in
    /// the request cannot go stale between check and use.
    pub async fn redeem(&self, promotion_id: &str) -> RepoResult<RedeemOutcome> {
        if let Some(updated) = self.repo.try_increment_redemptions(promotion_id).await? {
            return Ok(RedeemOutcome::Redeemed {
                new_count: updated.redemption_count,
            });
        }

        // Conditional did not fire: distinguish a missing record from an
        // exhausted cap.
        match self.repo.find_by_id(promotion_id).await? {
            Some(_) => Ok(RedeemOutcome::LimitReached),
            None => Ok(RedeemOutcome::NotFound),
        }
    }
}

impl std::fmt::Debug for PromotionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromotionEngine")
            .field("repo", &"<PromotionRepository>")
            .finish()
    }
}
