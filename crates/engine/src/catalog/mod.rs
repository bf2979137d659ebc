//! Variant catalog resolution.
//!
//! Turns the host platform's raw product attribute/variation data into a
//! normalized colour -> sizes catalog the rest of the engine works against.
//! Resolution is pure: the catalog is built once per product view and is
//! immutable for the duration of a shopping session.

pub mod attributes;
pub mod resolver;
pub mod swatch;

pub use attributes::{DetectedAttributes, RawAttribute, detect_attributes, detect_semantic_attribute};
pub use resolver::{ColorGroup, RawCatalog, RawTerm, RawVariation, Variant, VariantCatalog, resolve_catalog};
pub use swatch::{is_light_color, resolve_swatch_color};
