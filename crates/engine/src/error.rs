//! Engine error taxonomy.
//!
//! All commit-time validation errors are raised at the order-composer
//! boundary before any line item is emitted (fail fast, fail atomically).
//! Quote computation never raises for a well-formed selection - it reports
//! "not ready" through `committable = false` instead, since it runs on
//! every interaction rather than only at submit time.

use size_grid_core::PositionSlug;
use thiserror::Error;

/// Errors produced by the pricing engine and order composer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Selection references a variant missing from the catalog, or a
    /// quantity outside the variant's capacity. Indicates a stale
    /// catalog/UI desync rather than a user mistake.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Commit attempted with zero total quantity.
    #[error("no items selected")]
    EmptySelection,

    /// Bundle commit attempted with the wrong total quantity. Both counts
    /// are surfaced so the UI can tell the customer exactly what to adjust.
    #[error("bundle requires exactly {required} items, {selected} selected")]
    BundleQuantityMismatch {
        /// The bundle's fixed slot count.
        required: u32,
        /// The total quantity actually selected.
        selected: u32,
    },

    /// Commit blocked because a logo position was chosen without an
    /// attachment and without the explicit no-logo flag.
    #[error("logo customization is incomplete")]
    LogoIncomplete,

    /// A selected logo position is not offered for this product.
    #[error("logo position \"{0}\" is not available for this product")]
    InvalidLogoPosition(PositionSlug),

    /// A logo method value outside the supported set.
    #[error("unknown logo method: {0}")]
    InvalidLogoMethod(String),

    /// The external order system rejected the composed plan. The selection
    /// is left untouched so the customer can retry wholesale.
    #[error("order submission failed: {0}")]
    OrderSubmission(String),
}

/// Result type alias for [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
