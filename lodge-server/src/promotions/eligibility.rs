//! Promotion Eligibility
//!
//! Pure predicates over a point-in-time snapshot of a promotion. No side
//! effects and no locking; the redemption counter race is closed at
//! redemption time, not here.

use crate::db::models::{PromoScope, Promotion};

/// Check the inclusive validity window: active at exactly `starts_at` and
/// exactly `ends_at`.
pub fn is_within_window(promotion: &Promotion, now_ms: i64) -> bool {
    promotion.starts_at <= now_ms && now_ms <= promotion.ends_at
}

/// Check the global usage cap; uncapped promotions always have room
pub fn has_remaining_redemptions(promotion: &Promotion) -> bool {
    match promotion.max_redemptions {
        Some(max) => promotion.redemption_count < max,
        None => true,
    }
}

/// The currently-eligible predicate: kill-switch on, inside the window,
/// redemptions remaining.
pub fn is_currently_eligible(promotion: &Promotion, now_ms: i64) -> bool {
    promotion.is_active && is_within_window(promotion, now_ms) && has_remaining_redemptions(promotion)
}

/// Check a promotion against a requested scope. ALL-scoped promotions
/// match any request; no requested scope matches everything.
pub fn matches_scope(promotion: &Promotion, requested: Option<PromoScope>) -> bool {
    match requested {
        None => true,
        Some(scope) => promotion.scope == PromoScope::All || promotion.scope == scope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::DiscountType;

    fn make_promotion(starts_at: i64, ends_at: i64) -> Promotion {
        Promotion {
            id: None,
            name: "test".to_string(),
            discount_type: DiscountType::Percentage,
            value: 10.0,
            scope: PromoScope::All,
            target_room: None,
            target_service: None,
            code: None,
            starts_at,
            ends_at,
            minimum_amount: None,
            max_redemptions: None,
            max_redemptions_per_customer: 1,
            redemption_count: 0,
            is_active: true,
            terms: None,
            created_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_window_inclusive_on_both_ends() {
        let promo = make_promotion(1_000, 2_000);
        assert!(is_within_window(&promo, 1_000));
        assert!(is_within_window(&promo, 2_000));
        assert!(is_within_window(&promo, 1_500));
        assert!(!is_within_window(&promo, 999));
        assert!(!is_within_window(&promo, 2_001));
    }

    #[test]
    fn test_kill_switch_overrides_window() {
        let mut promo = make_promotion(1_000, 2_000);
        promo.is_active = false;
        assert!(!is_currently_eligible(&promo, 1_500));
    }

    #[test]
    fn test_usage_cap() {
        let mut promo = make_promotion(1_000, 2_000);
        promo.max_redemptions = Some(3);
        promo.redemption_count = 2;
        assert!(has_remaining_redemptions(&promo));

        promo.redemption_count = 3;
        assert!(!has_remaining_redemptions(&promo));
        assert!(!is_currently_eligible(&promo, 1_500));
    }

    #[test]
    fn test_uncapped_promotion_always_has_room() {
        let mut promo = make_promotion(1_000, 2_000);
        promo.redemption_count = 1_000_000;
        assert!(has_remaining_redemptions(&promo));
    }

    #[test]
    fn test_scope_matching() {
        let mut promo = make_promotion(1_000, 2_000);

        promo.scope = PromoScope::All;
        assert!(matches_scope(&promo, None));
        assert!(matches_scope(&promo, Some(PromoScope::Room)));
        assert!(matches_scope(&promo, Some(PromoScope::Event)));

        promo.scope = PromoScope::Room;
        assert!(matches_scope(&promo, None));
        assert!(matches_scope(&promo, Some(PromoScope::Room)));
        assert!(!matches_scope(&promo, Some(PromoScope::Service)));
    }
}
