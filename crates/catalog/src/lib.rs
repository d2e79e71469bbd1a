//! Catalog domain module.
//!
//! This crate contains the read-side of the storefront: the product record,
//! the immutable per-session catalog snapshot, and the pure filter/sort
//! functions that drive the browsable listing. No IO, no HTTP, no storage.

pub mod filter;
pub mod index;
pub mod product;
pub mod sort;

pub use filter::{FacetSelection, FilterSelection, PriceRange, filter};
pub use index::{CatalogIndex, FacetValues};
pub use product::{Product, ProductId, StockStatus};
pub use sort::{SortKey, sort};
