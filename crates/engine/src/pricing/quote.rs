//! Live quote computation.
//!
//! Recomputed synchronously after every selection or logo mutation; pure
//! and side-effect-free, so it may run arbitrarily often. "Not ready" is
//! reported through `committable = false`, never an error - the only error
//! is a selection referencing a variant missing from the catalog, which
//! indicates a stale catalog/UI desync.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::VariantCatalog;
use crate::error::{EngineError, Result};
use crate::logo::LogoSelection;
use crate::selection::Selection;

use super::config::{BundleSpec, ProductGridSettings, ProductPricingConfig};
use super::tiers::{DiscountTier, match_tier};

/// Bundle fill progress, for the quantity meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleProgress {
    /// Percent of the required quantity selected, capped at 100.
    pub percent_complete: Decimal,
    /// Units still needed to fill the bundle.
    pub remaining: u32,
    /// Whether the selection exceeds the required quantity. A flag for the
    /// meter only; commit is blocked by `committable`, not by this.
    pub over: bool,
}

/// A price quote for the current selection. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Sum of all selected quantities.
    pub total_quantity: u32,
    /// Per-unit discount in effect; zero when no tier matched.
    pub discount_per_unit: Decimal,
    /// The tier that matched, when any (per-unit mode only).
    pub matched_tier: Option<DiscountTier>,
    /// Logo surcharge per unit (per required slot in bundle mode).
    pub logo_surcharge: Decimal,
    /// Merchandise total before the bundle's logo slots are added; equals
    /// `grand_total` in per-unit mode.
    pub subtotal: Decimal,
    /// The total the customer would pay.
    pub grand_total: Decimal,
    /// Positions chosen but no attachment and no explicit no-logo escape.
    pub logo_incomplete: bool,
    /// Whether the selection satisfies all commit preconditions.
    pub committable: bool,
    /// Bundle fill progress; `None` in per-unit mode.
    pub bundle_progress: Option<BundleProgress>,
}

/// Compute the quote for the current selection.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSelection`] when the selection references
/// a variant missing from the catalog.
pub fn compute_quote(
    selection: &Selection,
    catalog: &VariantCatalog,
    settings: &ProductGridSettings,
    logo_selection: Option<&LogoSelection>,
) -> Result<Quote> {
    let total_quantity = selection.total_quantity();

    let logo_surcharge = match (settings.logo.as_ref(), logo_selection) {
        (Some(config), Some(logo)) => logo.surcharge(config),
        _ => Decimal::ZERO,
    };
    let logo_incomplete =
        settings.logo.is_some() && logo_selection.is_some_and(LogoSelection::is_incomplete);

    match &settings.pricing {
        ProductPricingConfig::PerUnit { tiers } => per_unit_quote(
            selection,
            catalog,
            tiers,
            total_quantity,
            logo_surcharge,
            logo_incomplete,
        ),
        ProductPricingConfig::Bundle(spec) => bundle_quote(
            selection,
            catalog,
            spec,
            total_quantity,
            logo_surcharge,
            logo_incomplete,
        ),
    }
}

fn resolve_lines<'a>(
    selection: &'a Selection,
    catalog: &'a VariantCatalog,
) -> Result<Vec<(&'a crate::catalog::Variant, u32)>> {
    selection
        .entries()
        .map(|(color, size, qty)| {
            catalog
                .variant(color, size)
                .map(|variant| (variant, qty))
                .ok_or_else(|| {
                    EngineError::InvalidSelection(format!("unknown variant {color}/{size}"))
                })
        })
        .collect()
}

fn per_unit_quote(
    selection: &Selection,
    catalog: &VariantCatalog,
    tiers: &[DiscountTier],
    total_quantity: u32,
    logo_surcharge: Decimal,
    logo_incomplete: bool,
) -> Result<Quote> {
    let matched_tier = match_tier(tiers, total_quantity).cloned();
    let discount_per_unit = matched_tier
        .as_ref()
        .map_or(Decimal::ZERO, |tier| tier.discount_per_unit);

    let mut subtotal = Decimal::ZERO;
    for (variant, qty) in resolve_lines(selection, catalog)? {
        let effective =
            (variant.unit_price - discount_per_unit + logo_surcharge).max(Decimal::ZERO);
        subtotal += effective * Decimal::from(qty);
    }
    // Never let a large discount drive the total negative.
    subtotal = subtotal.max(Decimal::ZERO);

    Ok(Quote {
        total_quantity,
        discount_per_unit,
        matched_tier,
        logo_surcharge,
        subtotal,
        grand_total: subtotal,
        logo_incomplete,
        committable: total_quantity > 0 && !logo_incomplete,
        bundle_progress: None,
    })
}

fn bundle_quote(
    selection: &Selection,
    catalog: &VariantCatalog,
    spec: &BundleSpec,
    total_quantity: u32,
    logo_surcharge: Decimal,
    logo_incomplete: bool,
) -> Result<Quote> {
    // Catalog membership is still enforced even though bundle pricing never
    // reads per-variant prices.
    resolve_lines(selection, catalog)?;

    let percent_complete = if spec.required_qty == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(total_quantity) / Decimal::from(spec.required_qty)
            * Decimal::ONE_HUNDRED)
            .min(Decimal::ONE_HUNDRED)
    };

    // The bundle always prices as exactly required_qty logo-bearing units,
    // regardless of the colour/size split.
    let grand_total = spec.fixed_price + logo_surcharge * Decimal::from(spec.required_qty);

    Ok(Quote {
        total_quantity,
        discount_per_unit: Decimal::ZERO,
        matched_tier: None,
        logo_surcharge,
        subtotal: spec.fixed_price,
        grand_total,
        logo_incomplete,
        committable: total_quantity == spec.required_qty && !logo_incomplete,
        bundle_progress: Some(BundleProgress {
            percent_complete,
            remaining: spec.required_qty.saturating_sub(total_quantity),
            over: total_quantity > spec.required_qty,
        }),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use size_grid_core::{ColorSlug, LogoMethod, PositionSlug, SizeSlug, VariationId};

    use super::*;
    use crate::catalog::{RawAttribute, RawCatalog, RawTerm, resolve_catalog};
    use crate::logo::{LogoAttachment, LogoConfig};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn catalog() -> VariantCatalog {
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

        let mut terms = BTreeMap::new();
        terms.insert(
            "pa_color".to_owned(),
            vec![
                RawTerm {
                    slug: "navy".to_owned(),
                    name: "Navy".to_owned(),
                    hex: None,
                },
                RawTerm {
                    slug: "black".to_owned(),
                    name: "Black".to_owned(),
                    hex: None,
                },
            ],
        );
        terms.insert(
            "pa_size".to_owned(),
            vec![
                RawTerm {
                    slug: "s".to_owned(),
                    name: "S".to_owned(),
                    hex: None,
                },
                RawTerm {
                    slug: "m".to_owned(),
                    name: "M".to_owned(),
                    hex: None,
                },
            ],
        );

        let mut id = 100;
        let mut variations = Vec::new();
        for color in ["navy", "black"] {
            for (size, in_stock, stock) in [("s", true, Some(10_u32)), ("m", false, Some(0))] {
                id += 1;
                let mut attrs = BTreeMap::new();
                attrs.insert("pa_color".to_owned(), color.to_owned());
                attrs.insert("pa_size".to_owned(), size.to_owned());
                variations.push(crate::catalog::RawVariation {
                    variation_id: VariationId::new(id),
                    attributes: attrs,
                    price: dec("12.50"),
                    in_stock,
                    stock_quantity: stock,
                });
            }
        }

        resolve_catalog(&RawCatalog {
            attributes,
            terms,
            variations,
        })
    }

    fn slug(s: &str) -> ColorSlug {
        ColorSlug::parse(s).unwrap()
    }

    fn size(s: &str) -> SizeSlug {
        SizeSlug::parse(s).unwrap()
    }

    fn pos(s: &str) -> PositionSlug {
        PositionSlug::parse(s).unwrap()
    }

    fn per_unit_settings(tiers: Vec<DiscountTier>) -> ProductGridSettings {
        ProductGridSettings {
            enabled: true,
            pricing: ProductPricingConfig::PerUnit { tiers },
            logo: None,
        }
    }

    fn bundle_settings(required_qty: u32, fixed_price: &str) -> ProductGridSettings {
        ProductGridSettings {
            enabled: true,
            pricing: ProductPricingConfig::Bundle(BundleSpec {
                required_qty,
                fixed_price: dec(fixed_price),
                display_name: None,
            }),
            logo: None,
        }
    }

    fn logo_config() -> LogoConfig {
        LogoConfig {
            allowed_positions: vec![pos("left-chest"), pos("back")],
            print_surcharge: dec("1.50"),
            embroidery_surcharge: dec("2.75"),
        }
    }

    #[test]
    fn test_per_unit_scenario() {
        // Catalog: navy/black x S/M at 12.50, M out of stock.
        // Selection navy S -> 6, tiers [(5, 9, 0.50)].
        let catalog = catalog();
        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 6)
            .unwrap();

        let settings = per_unit_settings(vec![DiscountTier {
            min: 5,
            max: 9,
            discount_per_unit: dec("0.50"),
        }]);

        let quote = compute_quote(&selection, &catalog, &settings, None).unwrap();
        assert_eq!(quote.total_quantity, 6);
        assert_eq!(quote.discount_per_unit, dec("0.50"));
        assert_eq!(quote.subtotal, dec("72.00"));
        assert_eq!(quote.grand_total, dec("72.00"));
        assert!(quote.committable);
        assert!(quote.bundle_progress.is_none());
    }

    #[test]
    fn test_per_unit_empty_selection_not_committable() {
        let catalog = catalog();
        let settings = per_unit_settings(Vec::new());
        let quote = compute_quote(&Selection::new(), &catalog, &settings, None).unwrap();
        assert_eq!(quote.total_quantity, 0);
        assert!(!quote.committable);
    }

    #[test]
    fn test_subtotal_never_negative() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 3)
            .unwrap();

        // Discount far exceeding the unit price.
        let settings = per_unit_settings(vec![DiscountTier {
            min: 1,
            max: 0,
            discount_per_unit: dec("100.00"),
        }]);

        let quote = compute_quote(&selection, &catalog, &settings, None).unwrap();
        assert_eq!(quote.subtotal, Decimal::ZERO);
        assert!(quote.committable);
    }

    #[test]
    fn test_per_unit_logo_surcharge_applies_per_unit() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 4)
            .unwrap();

        let mut settings = per_unit_settings(Vec::new());
        settings.logo = Some(logo_config());

        let mut logo = LogoSelection::new(LogoMethod::Embroidery);
        logo.toggle_position(&pos("left-chest"));
        logo.no_logo = true;

        let quote = compute_quote(&selection, &catalog, &settings, Some(&logo)).unwrap();
        assert_eq!(quote.logo_surcharge, dec("2.75"));
        // 4 * (12.50 + 2.75)
        assert_eq!(quote.subtotal, dec("61.00"));
        assert!(quote.committable);
    }

    #[test]
    fn test_logo_completeness_gating() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 2)
            .unwrap();

        let mut settings = per_unit_settings(Vec::new());
        settings.logo = Some(logo_config());

        let mut logo = LogoSelection::new(LogoMethod::Print);
        logo.toggle_position(&pos("left-chest"));

        // Positions chosen, no attachment, no escape: blocked.
        let quote = compute_quote(&selection, &catalog, &settings, Some(&logo)).unwrap();
        assert!(quote.logo_incomplete);
        assert!(!quote.committable);

        // The explicit escape unblocks commit.
        logo.no_logo = true;
        let quote = compute_quote(&selection, &catalog, &settings, Some(&logo)).unwrap();
        assert!(!quote.logo_incomplete);
        assert!(quote.committable);

        // So does an attachment.
        logo.no_logo = false;
        logo.attachment = Some(LogoAttachment {
            id: size_grid_core::AttachmentId::new(55),
            url: "https://cdn.example.com/logo.png".to_owned(),
        });
        let quote = compute_quote(&selection, &catalog, &settings, Some(&logo)).unwrap();
        assert!(quote.committable);
    }

    #[test]
    fn test_bundle_commit_exactness() {
        let catalog = catalog();
        let settings = bundle_settings(16, "99.99");

        for (navy_qty, black_qty, committable) in [(8, 7, false), (8, 8, true), (9, 8, false)] {
            let mut selection = Selection::new();
            selection
                .set_quantity(&catalog, &slug("navy"), &size("s"), navy_qty)
                .unwrap();
            selection
                .set_quantity(&catalog, &slug("black"), &size("s"), black_qty)
                .unwrap();

            let quote = compute_quote(&selection, &catalog, &settings, None).unwrap();
            assert_eq!(
                quote.committable, committable,
                "{navy_qty}+{black_qty} committable"
            );
        }
    }

    #[test]
    fn test_bundle_progress() {
        let catalog = catalog();
        let settings = bundle_settings(16, "99.99");

        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 4)
            .unwrap();

        let quote = compute_quote(&selection, &catalog, &settings, None).unwrap();
        let progress = quote.bundle_progress.unwrap();
        assert_eq!(progress.percent_complete, dec("25"));
        assert_eq!(progress.remaining, 12);
        assert!(!progress.over);
        assert_eq!(quote.grand_total, dec("99.99"));

        // Over-selection flags but keeps percent capped.
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 10)
            .unwrap();
        selection
            .set_quantity(&catalog, &slug("black"), &size("s"), 10)
            .unwrap();
        let quote = compute_quote(&selection, &catalog, &settings, None).unwrap();
        let progress = quote.bundle_progress.unwrap();
        assert_eq!(progress.percent_complete, Decimal::ONE_HUNDRED);
        assert_eq!(progress.remaining, 0);
        assert!(progress.over);
        assert!(!quote.committable);
    }

    #[test]
    fn test_bundle_logo_prices_per_required_slot() {
        let catalog = catalog();
        let mut settings = bundle_settings(16, "99.99");
        settings.logo = Some(logo_config());

        let mut selection = Selection::new();
        selection
            .set_quantity(&catalog, &slug("navy"), &size("s"), 10)
            .unwrap();
        selection
            .set_quantity(&catalog, &slug("black"), &size("s"), 6)
            .unwrap();

        let mut logo = LogoSelection::new(LogoMethod::Print);
        logo.toggle_position(&pos("back"));
        logo.no_logo = true;

        let quote = compute_quote(&selection, &catalog, &settings, Some(&logo)).unwrap();
        // 99.99 + 1.50 * 16, regardless of the colour/size split.
        assert_eq!(quote.grand_total, dec("123.99"));
        assert!(quote.committable);
    }

    #[test]
    fn test_unknown_variant_errors() {
        // Build a selection against one catalog, quote against a smaller one.
        let full = catalog();
        let mut selection = Selection::new();
        selection
            .set_quantity(&full, &slug("black"), &size("s"), 2)
            .unwrap();

        let mut raw_small = RawCatalog {
            attributes: vec![
                RawAttribute {
                    slug: "pa_color".to_owned(),
                    label: "Colour".to_owned(),
                },
                RawAttribute {
                    slug: "pa_size".to_owned(),
                    label: "Size".to_owned(),
                },
            ],
            terms: BTreeMap::new(),
            variations: Vec::new(),
        };
        let mut attrs = BTreeMap::new();
        attrs.insert("pa_color".to_owned(), "navy".to_owned());
        attrs.insert("pa_size".to_owned(), "s".to_owned());
        raw_small.variations.push(crate::catalog::RawVariation {
            variation_id: VariationId::new(1),
            attributes: attrs,
            price: dec("12.50"),
            in_stock: true,
            stock_quantity: None,
        });
        let small = resolve_catalog(&raw_small);

        let settings = per_unit_settings(Vec::new());
        let err = compute_quote(&selection, &small, &settings, None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection(_)));
    }
}
