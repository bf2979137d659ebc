//! Pricing: discount tiers, bundle specs, and quote computation.

pub mod config;
pub mod quote;
pub mod tiers;

pub use config::{BundleSpec, ProductGridSettings, ProductPricingConfig};
pub use quote::{BundleProgress, Quote, compute_quote};
pub use tiers::{DiscountTier, match_tier, resolve_discount};
