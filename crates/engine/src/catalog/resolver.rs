//! Raw catalog data -> normalized variant catalog.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use size_grid_core::{ColorSlug, SizeSlug, VariationId};
use tracing::warn;

use super::attributes::{RawAttribute, detect_attributes};
use super::swatch::resolve_swatch_color;

/// Synthetic colour key used when a product has no colour attribute.
pub const DEFAULT_COLOR_SLUG: &str = "default";

/// Synthetic size key used when a product has no size attribute.
pub const DEFAULT_SIZE_SLUG: &str = "default";

/// An attribute term as exposed by the host catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTerm {
    /// Term slug, e.g. `navy`.
    pub slug: String,
    /// Term display name, e.g. `Navy`.
    pub name: String,
    /// Explicit per-term hex metadata, when the host stores one.
    pub hex: Option<String>,
}

/// A purchasable variation row as exposed by the host catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVariation {
    /// Host-side variation identifier.
    pub variation_id: VariationId,
    /// Attribute slug -> selected term slug for this variation.
    pub attributes: BTreeMap<String, String>,
    /// Current unit price.
    pub price: Decimal,
    /// Whether the variation is purchasable right now.
    pub in_stock: bool,
    /// Managed stock quantity; `None` means unlimited.
    pub stock_quantity: Option<u32>,
}

/// Everything the host catalog supplies for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalog {
    /// Attribute candidates (colour/size detection runs over these).
    pub attributes: Vec<RawAttribute>,
    /// Attribute slug -> its terms.
    pub terms: BTreeMap<String, Vec<RawTerm>>,
    /// All purchasable variation rows.
    pub variations: Vec<RawVariation>,
}

/// One purchasable (colour, size) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Colour term slug (or the synthetic `default`).
    pub color_slug: ColorSlug,
    /// Size term slug (or the synthetic `default`).
    pub size_slug: SizeSlug,
    /// Colour display label.
    pub color_label: String,
    /// Size display label.
    pub size_label: String,
    /// Resolved swatch hex.
    pub swatch_hex: String,
    /// Unit price; never negative.
    pub unit_price: Decimal,
    /// Whether the variant is purchasable right now.
    pub in_stock: bool,
    /// Maximum orderable quantity; `None` means unlimited.
    pub capacity: Option<u32>,
    /// Opaque reference identifying this variant to the order system.
    pub variant_ref: VariationId,
}

/// One colour's worth of the catalog: label, swatch, and its sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    /// Colour term slug.
    pub slug: ColorSlug,
    /// Colour display label.
    pub label: String,
    /// Resolved swatch hex.
    pub swatch_hex: String,
    /// Sizes in catalog order.
    pub sizes: Vec<Variant>,
}

/// Normalized per-product catalog: colours in first-seen order, each with
/// its sizes in catalog order. `(colour, size)` is unique across the whole
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantCatalog {
    colors: Vec<ColorGroup>,
}

impl VariantCatalog {
    /// Colour groups in display order.
    #[must_use]
    pub fn colors(&self) -> &[ColorGroup] {
        &self.colors
    }

    /// Look up one colour group.
    #[must_use]
    pub fn color(&self, slug: &ColorSlug) -> Option<&ColorGroup> {
        self.colors.iter().find(|c| c.slug == *slug)
    }

    /// Look up one variant by its (colour, size) key.
    #[must_use]
    pub fn variant(&self, color: &ColorSlug, size: &SizeSlug) -> Option<&Variant> {
        self.color(color)
            .and_then(|c| c.sizes.iter().find(|v| v.size_slug == *size))
    }

    /// Whether every variation collapsed under the synthetic colour key.
    /// The UI suppresses colour-selection affordances for this case.
    #[must_use]
    pub fn is_single_variant(&self) -> bool {
        self.colors.len() == 1
            && self
                .colors
                .first()
                .is_some_and(|c| c.slug.as_str() == DEFAULT_COLOR_SLUG)
    }

    /// Whether no variation rows resolved at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

fn default_color_slug() -> ColorSlug {
    ColorSlug::parse(DEFAULT_COLOR_SLUG).unwrap_or_else(|_| unreachable!("static slug is valid"))
}

fn default_size_slug() -> SizeSlug {
    SizeSlug::parse(DEFAULT_SIZE_SLUG).unwrap_or_else(|_| unreachable!("static slug is valid"))
}

fn find_term<'a>(raw: &'a RawCatalog, attr_slug: &str, term_slug: &str) -> Option<&'a RawTerm> {
    raw.terms
        .get(attr_slug)
        .and_then(|terms| terms.iter().find(|t| t.slug == term_slug))
}

/// Build the normalized catalog from raw host data.
///
/// Rows that cannot be resolved (negative price, malformed term slug) are
/// skipped with a warning; a duplicate (colour, size) key keeps the first
/// row seen.
#[must_use]
pub fn resolve_catalog(raw: &RawCatalog) -> VariantCatalog {
    let detected = detect_attributes(&raw.attributes);

    let mut colors: Vec<ColorGroup> = Vec::new();

    for row in &raw.variations {
        if row.price < Decimal::ZERO {
            warn!(variation = %row.variation_id, "skipping variation with negative price");
            continue;
        }

        let (color_slug, color_label, swatch_hex) = match resolve_color_key(raw, &detected.color, row)
        {
            Some(resolved) => resolved,
            None => {
                warn!(variation = %row.variation_id, "skipping variation with malformed colour term");
                continue;
            }
        };

        let (size_slug, size_label) = match resolve_size_key(raw, &detected.size, row) {
            Some(resolved) => resolved,
            None => {
                warn!(variation = %row.variation_id, "skipping variation with malformed size term");
                continue;
            }
        };

        let group_idx = match colors.iter().position(|c| c.slug == color_slug) {
            Some(idx) => idx,
            None => {
                colors.push(ColorGroup {
                    slug: color_slug.clone(),
                    label: color_label.clone(),
                    swatch_hex: swatch_hex.clone(),
                    sizes: Vec::new(),
                });
                colors.len() - 1
            }
        };
        let Some(group) = colors.get_mut(group_idx) else {
            continue;
        };

        if group.sizes.iter().any(|v| v.size_slug == size_slug) {
            warn!(
                variation = %row.variation_id,
                color = %color_slug,
                size = %size_slug,
                "skipping duplicate (colour, size) variation"
            );
            continue;
        }

        group.sizes.push(Variant {
            color_slug,
            size_slug,
            color_label,
            size_label,
            swatch_hex,
            unit_price: row.price,
            in_stock: row.in_stock,
            capacity: row.stock_quantity,
            variant_ref: row.variation_id,
        });
    }

    VariantCatalog { colors }
}

fn resolve_color_key(
    raw: &RawCatalog,
    color_attr: &Option<String>,
    row: &RawVariation,
) -> Option<(ColorSlug, String, String)> {
    let Some(attr) = color_attr else {
        return Some((
            default_color_slug(),
            "Default".to_owned(),
            resolve_swatch_color("", "", None),
        ));
    };

    let term_slug = row.attributes.get(attr).map(String::as_str).unwrap_or("");
    if term_slug.is_empty() {
        return Some((
            default_color_slug(),
            "Default".to_owned(),
            resolve_swatch_color("", "", None),
        ));
    }

    let slug = ColorSlug::parse(term_slug).ok()?;
    let (label, hex_meta) = find_term(raw, attr, term_slug)
        .map_or_else(|| (term_slug.to_owned(), None), |t| (t.name.clone(), t.hex.as_deref()));
    let hex = resolve_swatch_color(&label, term_slug, hex_meta);
    Some((slug, label, hex))
}

fn resolve_size_key(
    raw: &RawCatalog,
    size_attr: &Option<String>,
    row: &RawVariation,
) -> Option<(SizeSlug, String)> {
    let Some(attr) = size_attr else {
        return Some((default_size_slug(), "Default".to_owned()));
    };

    let term_slug = row.attributes.get(attr).map(String::as_str).unwrap_or("");
    if term_slug.is_empty() {
        return Some((default_size_slug(), "Default".to_owned()));
    }

    let slug = SizeSlug::parse(term_slug).ok()?;
    let label = find_term(raw, attr, term_slug)
        .map_or_else(|| term_slug.to_owned(), |t| t.name.clone());
    Some((slug, label))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn raw_catalog() -> RawCatalog {
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

        let variation = |id: i64, color: &str, size: &str, price: &str, in_stock: bool| {
            let mut attrs = BTreeMap::new();
            attrs.insert("pa_color".to_owned(), color.to_owned());
            attrs.insert("pa_size".to_owned(), size.to_owned());
            RawVariation {
                variation_id: VariationId::new(id),
                attributes: attrs,
                price: dec(price),
                in_stock,
                stock_quantity: Some(10),
            }
        };

        RawCatalog {
            attributes,
            terms,
            variations: vec![
                variation(101, "navy", "s", "12.50", true),
                variation(102, "navy", "m", "12.50", false),
                variation(103, "black", "s", "12.50", true),
                variation(104, "black", "m", "12.50", true),
            ],
        }
    }

    #[test]
    fn test_groups_by_color_in_first_seen_order() {
        let catalog = resolve_catalog(&raw_catalog());
        let slugs: Vec<&str> = catalog.colors().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["navy", "black"]);

        let navy = catalog.color(&ColorSlug::parse("navy").unwrap()).unwrap();
        assert_eq!(navy.label, "Navy");
        assert_eq!(navy.swatch_hex, "#1e3a5f");
        assert_eq!(navy.sizes.len(), 2);
    }

    #[test]
    fn test_variant_lookup() {
        let catalog = resolve_catalog(&raw_catalog());
        let navy = ColorSlug::parse("navy").unwrap();
        let m = SizeSlug::parse("m").unwrap();

        let variant = catalog.variant(&navy, &m).unwrap();
        assert_eq!(variant.variant_ref, VariationId::new(102));
        assert!(!variant.in_stock);
        assert_eq!(variant.capacity, Some(10));
    }

    #[test]
    fn test_no_color_attribute_collapses_to_default() {
        let mut raw = raw_catalog();
        raw.attributes.retain(|a| a.slug != "pa_color");

        let catalog = resolve_catalog(&raw);
        // All four rows share "default" colour; duplicate sizes collapse.
        assert!(catalog.is_single_variant());
        let group = catalog.colors().first().unwrap();
        assert_eq!(group.label, "Default");
        assert_eq!(group.sizes.len(), 2);
    }

    #[test]
    fn test_duplicate_variant_keeps_first() {
        let mut raw = raw_catalog();
        let mut dup = raw.variations.first().unwrap().clone();
        dup.variation_id = VariationId::new(999);
        dup.price = dec("99.00");
        raw.variations.push(dup);

        let catalog = resolve_catalog(&raw);
        let variant = catalog
            .variant(
                &ColorSlug::parse("navy").unwrap(),
                &SizeSlug::parse("s").unwrap(),
            )
            .unwrap();
        assert_eq!(variant.variant_ref, VariationId::new(101));
        assert_eq!(variant.unit_price, dec("12.50"));
    }

    #[test]
    fn test_negative_price_row_is_skipped() {
        let mut raw = raw_catalog();
        if let Some(first) = raw.variations.first_mut() {
            first.price = dec("-1.00");
        }

        let catalog = resolve_catalog(&raw);
        assert!(
            catalog
                .variant(
                    &ColorSlug::parse("navy").unwrap(),
                    &SizeSlug::parse("s").unwrap(),
                )
                .is_none()
        );
    }

    #[test]
    fn test_explicit_term_hex_flows_through() {
        let mut raw = raw_catalog();
        if let Some(terms) = raw.terms.get_mut("pa_color")
            && let Some(navy) = terms.iter_mut().find(|t| t.slug == "navy")
        {
            navy.hex = Some("#010203".to_owned());
        }

        let catalog = resolve_catalog(&raw);
        let navy = catalog.color(&ColorSlug::parse("navy").unwrap()).unwrap();
        assert_eq!(navy.swatch_hex, "#010203");
    }

    #[test]
    fn test_empty_catalog() {
        let raw = RawCatalog {
            attributes: Vec::new(),
            terms: BTreeMap::new(),
            variations: Vec::new(),
        };
        let catalog = resolve_catalog(&raw);
        assert!(catalog.is_empty());
        assert!(!catalog.is_single_variant());
    }
}
