//! SortEngine: stable ordering of a filtered product subset.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use coldfront_core::{DomainError, DomainResult};

use crate::product::Product;

/// Comparator selector for the listing.
///
/// `Default` preserves catalog order (identity). Name keys compare
/// case-sensitively; price keys compare numerically. All keys are applied
/// with a stable sort, so ties keep their relative input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Default,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Default
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    /// Parse a sort control token as the UI supplies it.
    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "default" => Ok(Self::Default),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            other => Err(DomainError::validation(format!(
                "unknown sort key: {other}"
            ))),
        }
    }
}

/// Order `products` by `key`.
///
/// Uses `sort_by` (stable) so repeated sorts on data already ordered by
/// another key remain deterministic. `Default` returns the input unchanged.
pub fn sort(mut products: Vec<Product>, key: SortKey) -> Vec<Product> {
    match key {
        SortKey::Default => {}
        SortKey::NameAsc => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => products.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    products
}
