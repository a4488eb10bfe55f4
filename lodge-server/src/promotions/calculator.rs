//! Discount Calculator
//!
//! Pure price math for matched promotions. Prices are whole francs (no
//! fractional subunits in this currency); percentage arithmetic goes
//! through rust_decimal and rounds half-up to the nearest franc.

use rust_decimal::prelude::*;

use crate::db::models::{DiscountType, Promotion};

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to a whole franc, half-up
#[inline]
fn round_franc(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Compute the discounted price for a base price under a promotion.
///
/// - PERCENTAGE: `round(base * (1 - value/100))`.
/// - FIXED_AMOUNT: `base - value`; returns `None` when the result would be
///   zero or negative. An over-large fixed discount makes the promotion
///   not applicable rather than making the item free.
pub fn discounted_price(base_price: i64, promotion: &Promotion) -> Option<i64> {
    let base = Decimal::from(base_price);
    let value = to_decimal(promotion.value);

    match promotion.discount_type {
        DiscountType::Percentage => {
            let multiplier = Decimal::ONE - value / Decimal::ONE_HUNDRED;
            round_franc(base * multiplier)
        }
        DiscountType::FixedAmount => {
            let result = base - value;
            if result <= Decimal::ZERO {
                return None;
            }
            round_franc(result)
        }
    }
}

/// Check the promotion's base-price floor, if any
pub fn meets_minimum(promotion: &Promotion, base_price: i64) -> bool {
    match promotion.minimum_amount {
        Some(min) => base_price >= min,
        None => true,
    }
}

/// Display label for a promotion's value: "-20%" or "-5000 FCFA".
/// Shared by announcements and the public promotion listings.
pub fn discount_label(promotion: &Promotion) -> String {
    let value = to_decimal(promotion.value).normalize();
    match promotion.discount_type {
        DiscountType::Percentage => format!("-{}%", value),
        DiscountType::FixedAmount => format!("-{} FCFA", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PromoScope;

    fn make_promotion(discount_type: DiscountType, value: f64) -> Promotion {
        Promotion {
            id: None,
            name: "test".to_string(),
            discount_type,
            value,
            scope: PromoScope::All,
            target_room: None,
            target_service: None,
            code: None,
            starts_at: 0,
            ends_at: i64::MAX,
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
    fn test_percentage_rounds_to_whole_franc() {
        let promo = make_promotion(DiscountType::Percentage, 33.0);
        // 100 * 0.67 = 67.0
        assert_eq!(discounted_price(100, &promo), Some(67));
        // 10 * 0.67 = 6.7 → 7
        assert_eq!(discounted_price(10, &promo), Some(7));
    }

    #[test]
    fn test_percentage_half_rounds_up() {
        let promo = make_promotion(DiscountType::Percentage, 25.0);
        // 10 * 0.75 = 7.5 → 8
        assert_eq!(discounted_price(10, &promo), Some(8));
    }

    #[test]
    fn test_full_percentage_discount_is_free() {
        let promo = make_promotion(DiscountType::Percentage, 100.0);
        assert_eq!(discounted_price(5000, &promo), Some(0));
    }

    #[test]
    fn test_fixed_amount_subtracts() {
        let promo = make_promotion(DiscountType::FixedAmount, 1000.0);
        assert_eq!(discounted_price(5000, &promo), Some(4000));
    }

    #[test]
    fn test_fixed_amount_nonpositive_is_not_applicable() {
        // Exactly consumes the price → not applicable, never "free"
        let exact = make_promotion(DiscountType::FixedAmount, 5000.0);
        assert_eq!(discounted_price(5000, &exact), None);

        let over = make_promotion(DiscountType::FixedAmount, 6000.0);
        assert_eq!(discounted_price(5000, &over), None);
    }

    #[test]
    fn test_minimum_amount_floor() {
        let mut promo = make_promotion(DiscountType::Percentage, 10.0);
        promo.minimum_amount = Some(10_000);
        assert!(meets_minimum(&promo, 10_000));
        assert!(meets_minimum(&promo, 15_000));
        assert!(!meets_minimum(&promo, 9_999));
    }

    #[test]
    fn test_labels() {
        let pct = make_promotion(DiscountType::Percentage, 20.0);
        assert_eq!(discount_label(&pct), "-20%");

        let fixed = make_promotion(DiscountType::FixedAmount, 5000.0);
        assert_eq!(discount_label(&fixed), "-5000 FCFA");

        let fractional = make_promotion(DiscountType::Percentage, 12.5);
        assert_eq!(discount_label(&fractional), "-12.5%");
    }
}
