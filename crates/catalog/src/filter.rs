//! FacetFilterEngine: pure multi-facet filtering over a catalog snapshot.

use serde::{Deserialize, Serialize};

use coldfront_core::{DomainError, DomainResult, ValueObject};

use crate::product::Product;

/// Sentinel control value meaning "no constraint on brand".
pub const ALL_BRANDS: &str = "All Brands";
/// Sentinel control value meaning "no constraint on type".
pub const ALL_TYPES: &str = "All Types";
/// Sentinel control value meaning "no constraint on sub-type".
pub const ALL_SUB_TYPES: &str = "All Sub-Types";

/// Selection state of a single facet control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetSelection {
    /// The "All …" sentinel: this facet does not constrain the result.
    All,
    /// A concrete facet value, matched exactly (case-sensitive).
    Value(String),
}

impl FacetSelection {
    /// Interpret a raw control string against the facet's sentinel.
    ///
    /// Only an exact sentinel match means unconstrained, so a brand literally
    /// named "All Star" is still a concrete value.
    pub fn from_control(raw: &str, sentinel: &str) -> Self {
        if raw == sentinel {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    /// Whether a product's facet field passes this selection.
    ///
    /// An unspecified field (`None`) never matches a concrete value.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Value(wanted) => actual == Some(wanted.as_str()),
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Inclusive `[min, max]` price band in smallest currency units.
///
/// Deserialization routes through [`PriceRange::new`], so an inverted range
/// is rejected on the serde boundary as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceRangeBounds")]
pub struct PriceRange {
    min: u64,
    max: u64,
}

#[derive(Deserialize)]
struct PriceRangeBounds {
    min: u64,
    max: u64,
}

impl TryFrom<PriceRangeBounds> for PriceRange {
    type Error = DomainError;

    fn try_from(bounds: PriceRangeBounds) -> DomainResult<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> DomainResult<Self> {
        if min > max {
            return Err(DomainError::validation(format!(
                "price range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// The full price axis: no price constraint.
    pub fn unbounded() -> Self {
        Self { min: 0, max: u64::MAX }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Double-sided inclusive containment.
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ValueObject for PriceRange {}

/// The active filter selection: one selection per facet plus the price band.
///
/// Facets compose as a logical AND; a product passes only if every
/// constrained facet matches exactly and its price lies in the band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub brand: FacetSelection,
    pub product_type: FacetSelection,
    pub sub_type: FacetSelection,
    pub price: PriceRange,
}

impl FilterSelection {
    /// Build from the raw control strings and price bounds the UI supplies.
    pub fn from_controls(
        brand: &str,
        product_type: &str,
        sub_type: &str,
        min_price: u64,
        max_price: u64,
    ) -> DomainResult<Self> {
        Ok(Self {
            brand: FacetSelection::from_control(brand, ALL_BRANDS),
            product_type: FacetSelection::from_control(product_type, ALL_TYPES),
            sub_type: FacetSelection::from_control(sub_type, ALL_SUB_TYPES),
            price: PriceRange::new(min_price, max_price)?,
        })
    }

    /// Whether a product satisfies every constraint in this selection.
    pub fn matches(&self, product: &Product) -> bool {
        self.brand.matches(product.brand.as_deref())
            && self.product_type.matches(product.product_type.as_deref())
            && self.sub_type.matches(product.sub_type.as_deref())
            && self.price.contains(product.price)
    }
}

impl Default for FilterSelection {
    /// No constraint on any facet, full price range.
    fn default() -> Self {
        Self {
            brand: FacetSelection::All,
            product_type: FacetSelection::All,
            sub_type: FacetSelection::All,
            price: PriceRange::unbounded(),
        }
    }
}

impl ValueObject for FilterSelection {}

/// Compute the subset of `products` matching `selection`.
///
/// Stable: the relative order of passing elements is preserved. An empty
/// result is a valid outcome, not an error. Pure function of its inputs.
pub fn filter(products: &[Product], selection: &FilterSelection) -> Vec<Product> {
    products
        .iter()
        .filter(|p| selection.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ProductId, StockStatus};
    use coldfront_core::AggregateId;

    fn product(name: &str, brand: Option<&str>, product_type: Option<&str>, price: u64) -> Product {
        Product {
            id: ProductId::new(AggregateId::new()),
            name: name.to_string(),
            description: String::new(),
            price,
            brand: brand.map(str::to_string),
            product_type: product_type.map(str::to_string),
            sub_type: None,
            image_urls: vec![],
            stock_status: StockStatus::InStock,
        }
    }

    fn sample_catalog() -> Vec<Product> {
        vec![
            product("A", Some("Samsung"), Some("Split Type"), 48_000_00),
            product("B", Some("LG"), Some("Window Type"), 52_000_00),
            product("C", Some("Samsung"), Some("Window Type"), 89_000_00),
            product("D", None, Some("Split Type"), 60_000_00),
            product("E", Some("Samsung"), Some("Split Type"), 110_000_00),
        ]
    }

    #[test]
    fn unconstrained_selection_passes_everything() {
        let catalog = sample_catalog();
        let result = filter(&catalog, &FilterSelection::default());
        assert_eq!(result, catalog);
    }

    #[test]
    fn facets_compose_as_logical_and() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            brand: FacetSelection::Value("Samsung".to_string()),
            product_type: FacetSelection::Value("Window Type".to_string()),
            ..FilterSelection::default()
        };

        let result = filter(&catalog, &selection);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "C");
    }

    #[test]
    fn facet_match_is_case_sensitive_and_exact() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            brand: FacetSelection::Value("samsung".to_string()),
            ..FilterSelection::default()
        };
        assert!(filter(&catalog, &selection).is_empty());

        let partial = FilterSelection {
            brand: FacetSelection::Value("Sam".to_string()),
            ..FilterSelection::default()
        };
        assert!(filter(&catalog, &partial).is_empty());
    }

    #[test]
    fn unspecified_facet_fails_concrete_constraint() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            brand: FacetSelection::Value("Samsung".to_string()),
            ..FilterSelection::default()
        };

        let result = filter(&catalog, &selection);
        assert!(result.iter().all(|p| p.brand.as_deref() == Some("Samsung")));
        assert!(!result.iter().any(|p| p.name == "D"));
    }

    #[test]
    fn price_bounds_are_inclusive_on_both_sides() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            price: PriceRange::new(48_000_00, 52_000_00).unwrap(),
            ..FilterSelection::default()
        };

        let result = filter(&catalog, &selection);
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn samsung_price_band_scenario() {
        // Selection {brand: Samsung, price: [60000, 100000]} over the sample
        // catalog returns exactly C, in original relative order.
        let catalog = sample_catalog();
        let selection = FilterSelection::from_controls(
            "Samsung",
            ALL_TYPES,
            ALL_SUB_TYPES,
            60_000_00,
            100_000_00,
        )
        .unwrap();

        let result = filter(&catalog, &selection);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "C");
    }

    #[test]
    fn no_match_yields_empty_result_not_error() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            brand: FacetSelection::Value("Daikin".to_string()),
            ..FilterSelection::default()
        };
        assert!(filter(&catalog, &selection).is_empty());
    }

    #[test]
    fn sentinel_control_strings_mean_unconstrained() {
        let selection =
            FilterSelection::from_controls(ALL_BRANDS, ALL_TYPES, ALL_SUB_TYPES, 0, u64::MAX)
                .unwrap();
        assert_eq!(selection, FilterSelection::default());

        // The sentinel comparison is exact: a look-alike brand stays concrete.
        let concrete = FacetSelection::from_control("All Star", ALL_BRANDS);
        assert_eq!(concrete, FacetSelection::Value("All Star".to_string()));
    }

    #[test]
    fn inverted_price_range_is_rejected() {
        let err = PriceRange::new(100, 50).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected Validation error for inverted range"),
        }
    }

    #[test]
    fn deserialized_price_range_rejects_inverted_bounds() {
        let err = serde_json::from_str::<PriceRange>(r#"{"min":100,"max":50}"#).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));

        let range: PriceRange = serde_json::from_str(r#"{"min":50,"max":100}"#).unwrap();
        assert_eq!(range, PriceRange::new(50, 100).unwrap());
    }

    #[test]
    fn filtering_preserves_relative_order() {
        let catalog = sample_catalog();
        let selection = FilterSelection {
            brand: FacetSelection::Value("Samsung".to_string()),
            ..FilterSelection::default()
        };

        let result = filter(&catalog, &selection);
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "E"]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                prop::option::of(prop::sample::select(vec!["Samsung", "LG", "Daikin"])),
                prop::option::of(prop::sample::select(vec!["Split Type", "Window Type"])),
                0u64..200_000_00,
            )
                .prop_map(|(brand, product_type, price)| {
                    product("P", brand, product_type, price)
                })
        }

        fn arb_selection() -> impl Strategy<Value = FilterSelection> {
            (
                prop::option::of(prop::sample::select(vec!["Samsung", "LG", "Daikin"])),
                0u64..150_000_00,
                0u64..100_000_00,
            )
                .prop_map(|(brand, min, span)| FilterSelection {
                    brand: match brand {
                        Some(b) => FacetSelection::Value(b.to_string()),
                        None => FacetSelection::All,
                    },
                    price: PriceRange::new(min, min + span).unwrap(),
                    ..FilterSelection::default()
                })
        }

        proptest! {
            /// Every product in the result satisfies the selection; every
            /// product left out violates it.
            #[test]
            fn result_partitions_catalog_by_selection(
                catalog in prop::collection::vec(arb_product(), 0..40),
                selection in arb_selection(),
            ) {
                let result = filter(&catalog, &selection);
                for p in &result {
                    prop_assert!(selection.matches(p));
                }

                let kept: usize = catalog.iter().filter(|p| selection.matches(p)).count();
                prop_assert_eq!(result.len(), kept);
            }

            /// Filtering is idempotent.
            #[test]
            fn filtering_is_idempotent(
                catalog in prop::collection::vec(arb_product(), 0..40),
                selection in arb_selection(),
            ) {
                let once = filter(&catalog, &selection);
                let twice = filter(&once, &selection);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
