//! The customer's working selection: (colour, size) -> quantity.

use std::collections::BTreeMap;

use size_grid_core::{ColorSlug, SizeSlug};

use crate::catalog::VariantCatalog;
use crate::error::{EngineError, Result};

/// A mapping from (colour, size) to a positive quantity.
///
/// Absence of a key means zero; zero-quantity entries are never stored.
/// Iteration order is deterministic (sorted by key), which keeps quote and
/// line-item computation stable across recomputation passes. Session-local
/// working state - never persisted, so no serde.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    quantities: BTreeMap<(ColorSlug, SizeSlug), u32>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for one (colour, size) key, validating it against
    /// the catalog. A quantity of zero deletes the entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSelection`] when the key references no
    /// catalog variant, the variant is out of stock, or the quantity
    /// exceeds the variant's capacity.
    pub fn set_quantity(
        &mut self,
        catalog: &VariantCatalog,
        color: &ColorSlug,
        size: &SizeSlug,
        quantity: u32,
    ) -> Result<()> {
        let variant = catalog.variant(color, size).ok_or_else(|| {
            EngineError::InvalidSelection(format!("unknown variant {color}/{size}"))
        })?;

        if quantity == 0 {
            self.quantities.remove(&(color.clone(), size.clone()));
            return Ok(());
        }

        if !variant.in_stock {
            return Err(EngineError::InvalidSelection(format!(
                "variant {color}/{size} is out of stock"
            )));
        }

        if let Some(capacity) = variant.capacity
            && quantity > capacity
        {
            return Err(EngineError::InvalidSelection(format!(
                "quantity {quantity} exceeds capacity {capacity} for {color}/{size}"
            )));
        }

        self.quantities.insert((color.clone(), size.clone()), quantity);
        Ok(())
    }

    /// Quantity for one key; zero when absent.
    #[must_use]
    pub fn quantity(&self, color: &ColorSlug, size: &SizeSlug) -> u32 {
        self.quantities
            .get(&(color.clone(), size.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.quantities.values().sum()
    }

    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Number of distinct (colour, size) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Drop every entry for one colour. Used when the customer deselects a
    /// colour (bundle pill removal) or switches colour in single-select
    /// mode.
    pub fn remove_color(&mut self, color: &ColorSlug) {
        self.quantities.retain(|(c, _), _| c != color);
    }

    /// Reset to empty (after a successful commit).
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Entries in deterministic key order.
    pub fn entries(&self) -> impl Iterator<Item = (&ColorSlug, &SizeSlug, u32)> {
        self.quantities.iter().map(|((c, s), qty)| (c, s, *qty))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use size_grid_core::VariationId;

    use super::*;
    use crate::catalog::{RawAttribute, RawCatalog, RawTerm, resolve_catalog};

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
            vec![RawTerm {
                slug: "navy".to_owned(),
                name: "Navy".to_owned(),
                hex: None,
            }],
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

        let variation = |id: i64, size: &str, in_stock: bool, stock: Option<u32>| {
            let mut attrs = BTreeMap::new();
            attrs.insert("pa_color".to_owned(), "navy".to_owned());
            attrs.insert("pa_size".to_owned(), size.to_owned());
            crate::catalog::RawVariation {
                variation_id: VariationId::new(id),
                attributes: attrs,
                price: Decimal::new(1250, 2),
                in_stock,
                stock_quantity: stock,
            }
        };

        resolve_catalog(&RawCatalog {
            attributes,
            terms,
            variations: vec![
                variation(101, "s", true, Some(10)),
                variation(102, "m", false, Some(0)),
            ],
        })
    }

    fn navy() -> ColorSlug {
        ColorSlug::parse("navy").unwrap()
    }

    fn size(s: &str) -> SizeSlug {
        SizeSlug::parse(s).unwrap()
    }

    #[test]
    fn test_set_and_total() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.set_quantity(&catalog, &navy(), &size("s"), 6).unwrap();

        assert_eq!(selection.quantity(&navy(), &size("s")), 6);
        assert_eq!(selection.total_quantity(), 6);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_zero_deletes_the_entry() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.set_quantity(&catalog, &navy(), &size("s"), 6).unwrap();
        selection.set_quantity(&catalog, &navy(), &size("s"), 0).unwrap();

        assert!(selection.is_empty());
    }

    #[test]
    fn test_unknown_variant_errors() {
        let catalog = catalog();
        let mut selection = Selection::new();
        let err = selection
            .set_quantity(&catalog, &navy(), &size("xl"), 1)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection(_)));
    }

    #[test]
    fn test_out_of_stock_errors() {
        let catalog = catalog();
        let mut selection = Selection::new();
        let err = selection
            .set_quantity(&catalog, &navy(), &size("m"), 1)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection(_)));
    }

    #[test]
    fn test_over_capacity_errors() {
        let catalog = catalog();
        let mut selection = Selection::new();
        let err = selection
            .set_quantity(&catalog, &navy(), &size("s"), 11)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidSelection(_)));

        // At-capacity is fine.
        selection.set_quantity(&catalog, &navy(), &size("s"), 10).unwrap();
        assert_eq!(selection.total_quantity(), 10);
    }

    #[test]
    fn test_remove_color_and_clear() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.set_quantity(&catalog, &navy(), &size("s"), 3).unwrap();

        selection.remove_color(&navy());
        assert!(selection.is_empty());

        selection.set_quantity(&catalog, &navy(), &size("s"), 3).unwrap();
        selection.clear();
        assert!(selection.is_empty());
    }
}
