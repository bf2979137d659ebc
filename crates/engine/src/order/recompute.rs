//! Price recomputation from stored line metadata.
//!
//! The host order system recomputes its totals on its own schedule,
//! possibly several times for one committed order. Every composed line item
//! therefore embeds the inputs to its own price - base price and discount
//! separately for per-unit lines, the bundle price and representative flag
//! for bundle lines - and recomputation reads nothing but that embedded
//! data. Re-applying `base - discount` any number of times yields the same
//! answer, where mutating a stored price in place would compound.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use size_grid_core::{AttachmentId, GroupId, LogoMethod, PositionSlug};

/// Logo metadata stored on a composed line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLogoMetaRepr")]
pub struct StoredLogoMeta {
    /// Chosen positions.
    pub positions: Vec<PositionSlug>,
    /// Application method.
    pub method: LogoMethod,
    /// Surcharge per unit (per required slot for bundles), at commit time.
    pub surcharge: Decimal,
    /// Uploaded logo reference, when one was supplied.
    pub attachment_id: Option<AttachmentId>,
    /// Uploaded logo URL, when one was supplied.
    pub attachment_url: Option<String>,
    /// Customer instructions.
    pub notes: Option<String>,
}

/// Wire shape for [`StoredLogoMeta`]: accepts both the positions list and
/// the legacy single-position field older orders carry.
#[derive(Debug, Deserialize)]
struct StoredLogoMetaRepr {
    #[serde(default)]
    positions: Vec<PositionSlug>,
    #[serde(default)]
    position: Option<PositionSlug>,
    method: LogoMethod,
    surcharge: Decimal,
    #[serde(default)]
    attachment_id: Option<AttachmentId>,
    #[serde(default)]
    attachment_url: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<StoredLogoMetaRepr> for StoredLogoMeta {
    fn from(repr: StoredLogoMetaRepr) -> Self {
        let mut positions = repr.positions;
        if positions.is_empty()
            && let Some(single) = repr.position
        {
            positions.push(single);
        }
        Self {
            positions,
            method: repr.method,
            surcharge: repr.surcharge,
            attachment_id: repr.attachment_id,
            attachment_url: repr.attachment_url,
            notes: repr.notes,
        }
    }
}

/// Pricing inputs stored on a composed line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StoredPricing {
    /// Per-unit line: undiscounted base price plus the discount resolved at
    /// commit time, kept separate for idempotent re-application.
    PerUnit {
        /// Unit price captured at commit time, not yet discounted.
        base_price: Decimal,
        /// Discount resolved at commit time.
        discount_per_unit: Decimal,
    },
    /// Bundle line: the full bundle price (logo slots included) and whether
    /// this entry is the representative carrying it.
    Bundle {
        /// The committed bundle total.
        fixed_price: Decimal,
        /// The bundle's slot count.
        required_qty: u32,
        /// Whether this entry carries the bundle's monetary value.
        representative: bool,
    },
}

/// Everything the host must persist per line item to re-derive its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLineMeta {
    /// Group this entry was committed with.
    pub group_id: GroupId,
    /// Position within the group; 0 marks the visible representative.
    pub group_index: u32,
    /// Committed quantity.
    pub quantity: u32,
    /// Pricing inputs.
    pub pricing: StoredPricing,
    /// Logo metadata, when a logo customization was committed.
    pub logo: Option<StoredLogoMeta>,
}

/// Re-derive a line's unit price from its embedded metadata alone.
///
/// Per-unit lines price as `max(0, base - discount + logo surcharge)`;
/// bundle representatives as `fixed_price / quantity` so that price times
/// quantity reconstructs the bundle total; bundle sub-items as zero. Never
/// reads current cart state, so repeated invocation is idempotent.
#[must_use]
pub fn recompute_line_price(meta: &StoredLineMeta) -> Decimal {
    match &meta.pricing {
        StoredPricing::PerUnit {
            base_price,
            discount_per_unit,
        } => {
            let surcharge = meta
                .logo
                .as_ref()
                .map_or(Decimal::ZERO, |logo| logo.surcharge);
            (*base_price - *discount_per_unit + surcharge).max(Decimal::ZERO)
        }
        StoredPricing::Bundle {
            fixed_price,
            representative,
            ..
        } => {
            if *representative {
                *fixed_price / Decimal::from(meta.quantity.max(1))
            } else {
                Decimal::ZERO
            }
        }
    }
}
