//! Per-product pricing configuration.
//!
//! A product is in exactly one pricing mode, resolved once per product load
//! from the host's stored settings. The tagged union replaces scattered
//! "is this bundle mode?" flag checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::logo::LogoConfig;

use super::tiers::DiscountTier;

/// A fixed-quantity, fixed-price grouping sold as one unit regardless of
/// the colour/size mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSpec {
    /// Exact number of units the bundle must contain.
    pub required_qty: u32,
    /// Total price of the bundle.
    pub fixed_price: Decimal,
    /// Cart-facing name; `None` falls back to
    /// `"{required_qty} × {product title}"`.
    pub display_name: Option<String>,
}

/// The pricing mode a product is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProductPricingConfig {
    /// Individual items with quantity-break discounts.
    PerUnit {
        /// Discount tiers in admin-configured order.
        tiers: Vec<DiscountTier>,
    },
    /// Fixed-price bundle.
    Bundle(BundleSpec),
}

impl ProductPricingConfig {
    /// Whether the product sells as a bundle.
    #[must_use]
    pub const fn is_bundle(&self) -> bool {
        matches!(self, Self::Bundle(_))
    }
}

/// The resolved once-per-product-load view of the host's stored grid
/// settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGridSettings {
    /// Whether the size grid is enabled for this product at all.
    pub enabled: bool,
    /// Pricing mode and its parameters.
    pub pricing: ProductPricingConfig,
    /// Logo customization offer; `None` = unavailable.
    pub logo: Option<LogoConfig>,
}
