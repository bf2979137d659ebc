//! Line-item composition at commit time.
//!
//! Validation runs first and fails atomically - no entry is ever emitted
//! from a selection that fails any check. Emission order follows the
//! selection's deterministic key order, so the same selection always
//! composes the same plan (modulo the fresh group identifier).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use size_grid_core::{GroupId, ProductId, VariationId};
use tracing::debug;

use crate::catalog::{Variant, VariantCatalog};
use crate::error::{EngineError, Result};
use crate::logo::{LogoConfig, LogoSelection};
use crate::pricing::{
    BundleSpec, DiscountTier, ProductGridSettings, ProductPricingConfig, resolve_discount,
};
use crate::selection::Selection;

use super::hooks::{ComposeContext, ComposeHooks};
use super::recompute::{StoredLineMeta, StoredLogoMeta, StoredPricing};

/// Cart-facing display strings carried by a composed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMeta {
    /// Line title override; set on the bundle representative only.
    pub title: Option<String>,
    /// Colour display label.
    pub color_label: String,
    /// Size display label.
    pub size_label: String,
    /// Swatch hex for the colour dot next to the label.
    pub swatch_hex: String,
    /// Full colour/size breakdown of the group, for human review; set on
    /// the bundle representative only.
    pub breakdown: Option<String>,
    /// "Bulk discount" note; set on per-unit entries when a discount
    /// applied.
    pub discount_note: Option<String>,
}

/// One priced entry bound for the host order system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque variant reference for the order system.
    pub variant_ref: VariationId,
    /// Committed quantity.
    pub quantity: u32,
    /// The price the order system multiplies by quantity. Per-unit entries
    /// carry the undiscounted base price (the discount lives in
    /// `stored_meta` and is applied on recomputation); the bundle
    /// representative carries `bundle price / quantity`, its siblings zero.
    pub unit_price_override: Decimal,
    /// Group this entry must live and die with.
    pub group_id: GroupId,
    /// Position within the group; 0 is the visible representative.
    pub group_index: u32,
    /// Display strings.
    pub display_meta: DisplayMeta,
    /// Embedded recomputation metadata.
    pub stored_meta: StoredLineMeta,
}

/// The ordered set of entries produced by one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPlan {
    entries: Vec<LineItem>,
}

impl LineItemPlan {
    /// Entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan holds no entries. A successful compose never
    /// returns an empty plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The single group id shared by this plan's entries, when any.
    #[must_use]
    pub fn group_id(&self) -> Option<GroupId> {
        self.entries.first().map(|entry| entry.group_id)
    }

    /// The plan's monetary total, as the host order system will compute it:
    /// each line's recomputed unit price times its quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .map(|entry| {
                super::recompute::recompute_line_price(&entry.stored_meta)
                    * Decimal::from(entry.quantity)
            })
            .sum()
    }
}

/// Everything the composer needs for one commit.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    /// The product being committed.
    pub product_id: ProductId,
    /// Product title, for the bundle display-name fallback.
    pub product_title: &'a str,
    /// The selection to commit.
    pub selection: &'a Selection,
    /// The catalog the selection was built against.
    pub catalog: &'a VariantCatalog,
    /// Resolved per-product settings.
    pub settings: &'a ProductGridSettings,
    /// The customer's logo choices, when the wizard was used.
    pub logo_selection: Option<&'a LogoSelection>,
}

/// Compose the line-item plan for a committed selection.
///
/// # Errors
///
/// All validation happens before any entry is built:
/// - [`EngineError::InvalidSelection`] - a key is missing from the catalog
/// - [`EngineError::EmptySelection`] - zero total quantity
/// - [`EngineError::BundleQuantityMismatch`] - bundle total differs from
///   the required quantity (a hard error, never a clamp)
/// - [`EngineError::InvalidLogoPosition`] / [`EngineError::LogoIncomplete`]
///   - logo choices that fail against the product configuration
pub fn compose_order(req: &ComposeRequest<'_>, hooks: &ComposeHooks) -> Result<LineItemPlan> {
    let lines = resolve_lines(req.selection, req.catalog)?;
    let total_quantity = req.selection.total_quantity();

    match &req.settings.pricing {
        ProductPricingConfig::PerUnit { .. } => {
            if total_quantity == 0 {
                return Err(EngineError::EmptySelection);
            }
        }
        ProductPricingConfig::Bundle(spec) => {
            if total_quantity != spec.required_qty {
                return Err(EngineError::BundleQuantityMismatch {
                    required: spec.required_qty,
                    selected: total_quantity,
                });
            }
            if total_quantity == 0 {
                return Err(EngineError::EmptySelection);
            }
        }
    }

    let logo = validate_logo(req.settings.logo.as_ref(), req.logo_selection)?;
    let stored_logo = logo.and_then(|(config, selection)| build_stored_logo(config, selection));

    let cx = ComposeContext {
        product_id: req.product_id,
        selection: req.selection,
        bundle: req.settings.pricing.is_bundle(),
    };
    hooks.run_before(&cx);

    let group_id = GroupId::generate();
    let entries = match &req.settings.pricing {
        ProductPricingConfig::PerUnit { tiers } => per_unit_entries(
            &lines,
            tiers,
            total_quantity,
            group_id,
            stored_logo.as_ref(),
        ),
        ProductPricingConfig::Bundle(spec) => bundle_entries(
            &lines,
            spec,
            req.product_title,
            group_id,
            stored_logo.as_ref(),
        ),
    };

    let plan = LineItemPlan { entries };
    debug!(
        product = %req.product_id,
        group = %group_id,
        entries = plan.len(),
        bundle = cx.bundle,
        "composed line-item plan"
    );

    hooks.run_after(&cx, &plan);
    Ok(plan)
}

fn resolve_lines<'a>(
    selection: &'a Selection,
    catalog: &'a VariantCatalog,
) -> Result<Vec<(&'a Variant, u32)>> {
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

fn validate_logo<'a>(
    config: Option<&'a LogoConfig>,
    selection: Option<&'a LogoSelection>,
) -> Result<Option<(&'a LogoConfig, &'a LogoSelection)>> {
    match (config, selection) {
        (Some(config), Some(selection)) => {
            selection.validate(config)?;
            if selection.is_incomplete() {
                return Err(EngineError::LogoIncomplete);
            }
            Ok(Some((config, selection)))
        }
        (None, Some(selection)) => {
            // Logo data against a product that offers none: stale config
            // or tampering.
            if let Some(position) = selection.positions.first() {
                return Err(EngineError::InvalidLogoPosition(position.clone()));
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

fn build_stored_logo(config: &LogoConfig, selection: &LogoSelection) -> Option<StoredLogoMeta> {
    if !selection.has_positions() && selection.attachment.is_none() {
        return None;
    }
    Some(StoredLogoMeta {
        positions: selection.positions.clone(),
        method: selection.method,
        surcharge: selection.surcharge(config),
        attachment_id: selection.attachment.as_ref().map(|a| a.id),
        attachment_url: selection.attachment.as_ref().map(|a| a.url.clone()),
        notes: selection.notes.clone(),
    })
}

fn per_unit_entries(
    lines: &[(&Variant, u32)],
    tiers: &[DiscountTier],
    total_quantity: u32,
    group_id: GroupId,
    stored_logo: Option<&StoredLogoMeta>,
) -> Vec<LineItem> {
    let discount = resolve_discount(tiers, total_quantity);
    let discount_note =
        (discount > Decimal::ZERO).then(|| format!("Bulk discount -{discount} per item"));

    lines
        .iter()
        .enumerate()
        .map(|(idx, (variant, quantity))| {
            let group_index = u32::try_from(idx).unwrap_or(u32::MAX);
            LineItem {
                variant_ref: variant.variant_ref,
                quantity: *quantity,
                unit_price_override: variant.unit_price,
                group_id,
                group_index,
                display_meta: DisplayMeta {
                    title: None,
                    color_label: variant.color_label.clone(),
                    size_label: variant.size_label.clone(),
                    swatch_hex: variant.swatch_hex.clone(),
                    breakdown: None,
                    discount_note: discount_note.clone(),
                },
                stored_meta: StoredLineMeta {
                    group_id,
                    group_index,
                    quantity: *quantity,
                    pricing: StoredPricing::PerUnit {
                        base_price: variant.unit_price,
                        discount_per_unit: discount,
                    },
                    // Attached identically to every entry in the group.
                    logo: stored_logo.cloned(),
                },
            }
        })
        .collect()
}

fn bundle_entries(
    lines: &[(&Variant, u32)],
    spec: &BundleSpec,
    product_title: &str,
    group_id: GroupId,
    stored_logo: Option<&StoredLogoMeta>,
) -> Vec<LineItem> {
    // The committed bundle total folds the logo slots in up front, so
    // recomputation needs nothing beyond the stored price.
    let surcharge = stored_logo.map_or(Decimal::ZERO, |logo| logo.surcharge);
    let bundle_total = spec.fixed_price + surcharge * Decimal::from(spec.required_qty);

    let title = spec.display_name.clone().unwrap_or_else(|| {
        format!("{} × {product_title}", spec.required_qty)
    });
    let breakdown = lines
        .iter()
        .map(|(variant, qty)| {
            format!("{} {} ×{qty}", variant.color_label, variant.size_label)
        })
        .collect::<Vec<_>>()
        .join(", ");

    lines
        .iter()
        .enumerate()
        .map(|(idx, (variant, quantity))| {
            let group_index = u32::try_from(idx).unwrap_or(u32::MAX);
            let representative = group_index == 0;
            let unit_price_override = if representative {
                bundle_total / Decimal::from((*quantity).max(1))
            } else {
                Decimal::ZERO
            };

            LineItem {
                variant_ref: variant.variant_ref,
                quantity: *quantity,
                unit_price_override,
                group_id,
                group_index,
                display_meta: DisplayMeta {
                    title: representative.then(|| title.clone()),
                    color_label: variant.color_label.clone(),
                    size_label: variant.size_label.clone(),
                    swatch_hex: variant.swatch_hex.clone(),
                    breakdown: representative.then(|| breakdown.clone()),
                    discount_note: None,
                },
                stored_meta: StoredLineMeta {
                    group_id,
                    group_index,
                    quantity: *quantity,
                    pricing: StoredPricing::Bundle {
                        fixed_price: bundle_total,
                        required_qty: spec.required_qty,
                        representative,
                    },
                    // One logo per group, carried by the representative.
                    logo: representative.then(|| stored_logo.cloned()).flatten(),
                },
            }
        })
        .collect()
}
