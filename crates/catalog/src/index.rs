use std::collections::BTreeSet;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use coldfront_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};

/// Immutable in-memory snapshot of the product records for one session.
///
/// The source of truth for filtering and sorting. Construction enforces the
/// snapshot invariant that `id` is unique; live updates are the data layer's
/// responsibility and arrive as a replacement snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    products: Vec<Product>,
}

/// Distinct facet values present in a snapshot, used to populate the
/// brand/type/sub-type filter controls. Each set is sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    pub brands: Vec<String>,
    pub product_types: Vec<String>,
    pub sub_types: Vec<String>,
}

impl CatalogIndex {
    /// Build a snapshot, rejecting duplicate product identifiers.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen: HashSet<ProductId> = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(DomainError::validation(format!(
                    "duplicate product id in catalog snapshot: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// An empty snapshot (valid: the listing renders a "no results" affordance).
    pub fn empty() -> Self {
        Self { products: Vec::new() }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Collect the distinct facet values present in this snapshot.
    ///
    /// Unspecified (absent) facet values are skipped; they are not a
    /// selectable filter choice.
    pub fn facet_values(&self) -> FacetValues {
        fn distinct<'a>(
            products: &'a [Product],
            field: impl Fn(&'a Product) -> Option<&'a String>,
        ) -> Vec<String> {
            products
                .iter()
                .filter_map(field)
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }

        FacetValues {
            brands: distinct(&self.products, |p| p.brand.as_ref()),
            product_types: distinct(&self.products, |p| p.product_type.as_ref()),
            sub_types: distinct(&self.products, |p| p.sub_type.as_ref()),
        }
    }
}
