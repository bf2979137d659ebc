//! Logo customization sub-flow.
//!
//! A product may offer logo application (print or embroidery) at a set of
//! admin-configured positions, for a per-unit surcharge. The customer picks
//! positions and a method, then either uploads a logo through the host's
//! upload service or explicitly opts to supply one later. Completeness is
//! judged by the pricing engine at commit time, not by the wizard.

pub mod wizard;

pub use wizard::{LogoWizard, WizardStep};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use size_grid_core::{AttachmentId, LogoMethod, PositionSlug};

use crate::error::{EngineError, Result};

/// Maximum accepted logo upload size, enforced by the host upload service.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types the host upload service should accept.
pub const ACCEPTED_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Human labels for the well-known logo positions.
static POSITION_LABELS: &[(&str, &str)] = &[
    ("left-chest", "Left Chest"),
    ("right-chest", "Right Chest"),
    ("centre-chest", "Centre Chest"),
    ("left-sleeve", "Left Sleeve"),
    ("right-sleeve", "Right Sleeve"),
    ("back", "Back"),
];

/// Display label for a position slug; unknown slugs fall back to the slug
/// itself.
#[must_use]
pub fn position_label(slug: &PositionSlug) -> &str {
    POSITION_LABELS
        .iter()
        .find(|(s, _)| *s == slug.as_str())
        .map_or_else(|| slug.as_str(), |(_, label)| *label)
}

/// Parse a raw method string from host data.
///
/// # Errors
///
/// Returns [`EngineError::InvalidLogoMethod`] for anything outside
/// `print` / `embroidery`.
pub fn parse_logo_method(raw: &str) -> Result<LogoMethod> {
    raw.parse()
        .map_err(|_| EngineError::InvalidLogoMethod(raw.to_owned()))
}

/// Per-product logo configuration. Absent entirely when the product does
/// not offer logo customization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Positions offered for this product, in display order.
    pub allowed_positions: Vec<PositionSlug>,
    /// Per-unit surcharge for printed logos.
    pub print_surcharge: Decimal,
    /// Per-unit surcharge for embroidered logos.
    pub embroidery_surcharge: Decimal,
}

impl LogoConfig {
    /// Surcharge for one application method.
    #[must_use]
    pub fn surcharge_for(&self, method: LogoMethod) -> Decimal {
        match method {
            LogoMethod::Print => self.print_surcharge,
            LogoMethod::Embroidery => self.embroidery_surcharge,
        }
    }

    /// Whether a position is offered for this product.
    #[must_use]
    pub fn allows(&self, position: &PositionSlug) -> bool {
        self.allowed_positions.contains(position)
    }
}

/// Opaque reference to an uploaded logo file, as returned by the host
/// upload service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoAttachment {
    /// Host-side attachment identifier.
    pub id: AttachmentId,
    /// Public URL of the uploaded file.
    pub url: String,
}

/// The customer's logo choices for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoSelection {
    /// Chosen positions, in selection order, deduplicated.
    pub positions: Vec<PositionSlug>,
    /// Chosen application method.
    pub method: LogoMethod,
    /// Uploaded logo, when one exists.
    pub attachment: Option<LogoAttachment>,
    /// Free-form instructions for the production team.
    pub notes: Option<String>,
    /// Explicit "I don't have a logo yet" escape: permits commit without an
    /// attachment.
    pub no_logo: bool,
}

impl LogoSelection {
    /// Create an empty selection with the given method.
    #[must_use]
    pub fn new(method: LogoMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Toggle one position on or off, preserving selection order.
    pub fn toggle_position(&mut self, position: &PositionSlug) {
        if let Some(idx) = self.positions.iter().position(|p| p == position) {
            self.positions.remove(idx);
        } else {
            self.positions.push(position.clone());
        }
    }

    /// Whether any position is chosen.
    #[must_use]
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }

    /// The surcharge this selection adds per unit (or per bundle slot):
    /// zero with no positions chosen, else the method's configured
    /// surcharge.
    #[must_use]
    pub fn surcharge(&self, config: &LogoConfig) -> Decimal {
        if self.positions.is_empty() {
            Decimal::ZERO
        } else {
            config.surcharge_for(self.method)
        }
    }

    /// The blocking "incomplete" state: positions chosen, but neither an
    /// attachment nor the explicit no-logo escape.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.has_positions() && self.attachment.is_none() && !self.no_logo
    }

    /// Validate every chosen position against the product configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLogoPosition`] naming the first
    /// position outside the allowed set; invalid positions are never
    /// silently dropped.
    pub fn validate(&self, config: &LogoConfig) -> Result<()> {
        for position in &self.positions {
            if !config.allows(position) {
                return Err(EngineError::InvalidLogoPosition(position.clone()));
            }
        }
        Ok(())
    }
}
