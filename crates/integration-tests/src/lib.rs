//! Integration tests for Size Grid.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p size-grid-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `per_unit_flow` - Catalog -> selection -> quote -> compose ->
//!   recompute for the per-unit (quantity break) mode
//! - `bundle_flow` - The same pipeline for bundle mode, plus group cascade
//!   removal
//! - `logo_flow` - Wizard -> quote gating -> composed logo metadata
//!
//! This crate's library part holds the shared fixtures: a small polo-shirt
//! catalog and settings builders used by every scenario.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use size_grid_core::{ColorSlug, PositionSlug, SizeSlug, VariationId};
use size_grid_engine::catalog::{
    RawAttribute, RawCatalog, RawTerm, RawVariation, VariantCatalog, resolve_catalog,
};
use size_grid_engine::logo::LogoConfig;
use size_grid_engine::pricing::{
    BundleSpec, DiscountTier, ProductGridSettings, ProductPricingConfig,
};

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics on a malformed literal; fixtures only.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Parse a colour slug literal.
///
/// # Panics
///
/// Panics on a malformed literal; fixtures only.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn color(s: &str) -> ColorSlug {
    ColorSlug::parse(s).unwrap()
}

/// Parse a size slug literal.
///
/// # Panics
///
/// Panics on a malformed literal; fixtures only.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn size(s: &str) -> SizeSlug {
    SizeSlug::parse(s).unwrap()
}

/// Parse a position slug literal.
///
/// # Panics
///
/// Panics on a malformed literal; fixtures only.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn position(s: &str) -> PositionSlug {
    PositionSlug::parse(s).unwrap()
}

/// Build the test polo catalog: navy/black/hot-pink x S/M/L at 12.50, with
/// navy M out of stock and black S capacity-limited to 8.
#[must_use]
pub fn polo_catalog() -> VariantCatalog {
    let attributes = vec![
        RawAttribute {
            slug: "pa_color".to_owned(),
            label: "Colour".to_owned(),
        },
        RawAttribute {
            slug: "pa_size".to_owned(),
            label: "Size".to_owned(),
        },
    ];

    let color_terms = [("navy", "Navy"), ("black", "Black"), ("hot-pink", "Hot Pink")];
    let size_terms = [("s", "S"), ("m", "M"), ("l", "L")];

    let mut terms = BTreeMap::new();
    terms.insert(
        "pa_color".to_owned(),
        color_terms
            .iter()
            .map(|(slug, name)| RawTerm {
                slug: (*slug).to_owned(),
                name: (*name).to_owned(),
                hex: None,
            })
            .collect(),
    );
    terms.insert(
        "pa_size".to_owned(),
        size_terms
            .iter()
            .map(|(slug, name)| RawTerm {
                slug: (*slug).to_owned(),
                name: (*name).to_owned(),
                hex: None,
            })
            .collect(),
    );

    let mut variations = Vec::new();
    let mut id = 1000;
    for (color_slug, _) in color_terms {
        for (size_slug, _) in size_terms {
            id += 1;
            let mut attrs = BTreeMap::new();
            attrs.insert("pa_color".to_owned(), color_slug.to_owned());
            attrs.insert("pa_size".to_owned(), size_slug.to_owned());

            let in_stock = !(color_slug == "navy" && size_slug == "m");
            let stock_quantity = if color_slug == "black" && size_slug == "s" {
                Some(8)
            } else {
                None
            };

            variations.push(RawVariation {
                variation_id: VariationId::new(id),
                attributes: attrs,
                price: dec("12.50"),
                in_stock,
                stock_quantity,
            });
        }
    }

    resolve_catalog(&RawCatalog {
        attributes,
        terms,
        variations,
    })
}

/// Per-unit settings with the standard three-tier ladder.
#[must_use]
pub fn per_unit_settings() -> ProductGridSettings {
    ProductGridSettings {
        enabled: true,
        pricing: ProductPricingConfig::PerUnit {
            tiers: vec![
                DiscountTier {
                    min: 1,
                    max: 9,
                    discount_per_unit: Decimal::ZERO,
                },
                DiscountTier {
                    min: 10,
                    max: 24,
                    discount_per_unit: dec("1.00"),
                },
                DiscountTier {
                    min: 25,
                    max: 0,
                    discount_per_unit: dec("2.00"),
                },
            ],
        },
        logo: None,
    }
}

/// Bundle settings: 16 units for 99.99.
#[must_use]
pub fn bundle_settings() -> ProductGridSettings {
    ProductGridSettings {
        enabled: true,
        pricing: ProductPricingConfig::Bundle(BundleSpec {
            required_qty: 16,
            fixed_price: dec("99.99"),
            display_name: Some("Workwear Starter Pack".to_owned()),
        }),
        logo: None,
    }
}

/// Logo configuration offering chest and back placement.
#[must_use]
pub fn logo_config() -> LogoConfig {
    LogoConfig {
        allowed_positions: vec![position("left-chest"), position("right-chest"), position("back")],
        print_surcharge: dec("1.50"),
        embroidery_surcharge: dec("2.75"),
    }
}
