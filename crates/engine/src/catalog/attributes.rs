//! Semantic attribute detection.
//!
//! The host catalog does not mark which product attribute "means" colour or
//! size - storefronts name them freely (`pa_color`, `colour`, `shirt-size`,
//! ...). Detection is a substring heuristic over the attribute label and
//! slug, isolated here so it stays unit-testable apart from catalog loading.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A candidate product attribute as exposed by the host catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttribute {
    /// Taxonomy slug, e.g. `pa_color`.
    pub slug: String,
    /// Human label, e.g. `Colour`.
    pub label: String,
}

/// The attribute slugs detected as meaning colour and size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedAttributes {
    /// Attribute slug carrying colour terms, when one was found.
    pub color: Option<String>,
    /// Attribute slug carrying size terms, when one was found.
    pub size: Option<String>,
}

/// Find the attribute whose label or slug contains one of `keywords`
/// (case-insensitive). When several match, the last one wins.
#[must_use]
pub fn detect_semantic_attribute<'a>(
    candidates: &'a [RawAttribute],
    keywords: &[&str],
) -> Option<&'a RawAttribute> {
    candidates
        .iter()
        .filter(|attr| {
            let label = attr.label.to_lowercase();
            let slug = attr.slug.to_lowercase();
            keywords
                .iter()
                .any(|kw| label.contains(kw) || slug.contains(kw))
        })
        .next_back()
}

/// Detect the colour and size attributes on a product.
///
/// Logs a warning when either cannot be found; a missing colour attribute
/// collapses the catalog under a single synthetic colour, and a missing
/// size attribute collapses sizes the same way.
#[must_use]
pub fn detect_attributes(candidates: &[RawAttribute]) -> DetectedAttributes {
    let color = detect_semantic_attribute(candidates, &["color", "colour"]);
    let size = detect_semantic_attribute(candidates, &["size"]);

    if color.is_none() || size.is_none() {
        let found: Vec<&str> = candidates.iter().map(|a| a.slug.as_str()).collect();
        warn!(
            attributes = ?found,
            color_detected = color.is_some(),
            size_detected = size.is_some(),
            "could not detect colour/size attributes"
        );
    }

    DetectedAttributes {
        color: color.map(|a| a.slug.clone()),
        size: size.map(|a| a.slug.clone()),
    }
}
