//! Quantity-break discount tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A quantity range mapped to a per-unit discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Minimum quantity for this tier (inclusive).
    pub min: u32,
    /// Maximum quantity for this tier (inclusive); 0 = unbounded.
    pub max: u32,
    /// Discount applied to every unit when this tier matches.
    pub discount_per_unit: Decimal,
}

/// Find the applicable tier for a total quantity.
///
/// First tier in list order whose range contains `qty` wins - the list is
/// taken as the admin configured it, not re-sorted, and overlapping tiers
/// are intentionally not validated (behavior is order-dependent).
#[must_use]
pub fn match_tier(tiers: &[DiscountTier], qty: u32) -> Option<&DiscountTier> {
    if qty == 0 {
        return None;
    }

    tiers
        .iter()
        .find(|tier| qty >= tier.min && (tier.max == 0 || qty <= tier.max))
}

/// The per-unit discount for a total quantity; zero when no tier matches,
/// the quantity is zero, or there are no tiers. O(tiers), no mutation.
#[must_use]
pub fn resolve_discount(tiers: &[DiscountTier], qty: u32) -> Decimal {
    match_tier(tiers, qty).map_or(Decimal::ZERO, |tier| tier.discount_per_unit)
}
