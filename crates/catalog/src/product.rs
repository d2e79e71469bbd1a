use serde::{Deserialize, Serialize};

use coldfront_core::{AggregateId, Entity};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock availability of a product.
///
/// `OutOfStock` excludes the product from inquiry-add eligibility;
/// `MadeToOrder` items can be inquired about despite not being on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    MadeToOrder,
}

/// Product record as supplied by the data-access collaborator.
///
/// This is boundary data: one unified representation serves the listing,
/// detail, and cart paths. Prices are in the smallest currency unit
/// (centavos), so non-negativity holds by construction. Absent facet values
/// mean "unspecified" and never match a concrete facet constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (centavos).
    pub price: u64,
    pub brand: Option<String>,
    pub product_type: Option<String>,
    pub sub_type: Option<String>,
    /// Ordered image references; the first entry is the primary image.
    pub image_urls: Vec<String>,
    pub stock_status: StockStatus,
}

impl Product {
    /// The primary (first) image reference, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Whether this product may be added to an inquiry cart.
    pub fn can_be_inquired(&self) -> bool {
        self.stock_status != StockStatus::OutOfStock
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(AggregateId::new()),
            name: "Split-Type Inverter 1.5HP".to_string(),
            description: "Wall-mounted split-type unit".to_string(),
            price: 48_000_00,
            brand: Some("Samsung".to_string()),
            product_type: Some("Split Type".to_string()),
            sub_type: Some("Inverter".to_string()),
            image_urls: vec!["front.jpg".to_string(), "side.jpg".to_string()],
            stock_status: StockStatus::InStock,
        }
    }

    #[test]
    fn primary_image_is_first_entry() {
        let product = sample();
        assert_eq!(product.primary_image(), Some("front.jpg"));
    }

    #[test]
    fn primary_image_is_none_without_images() {
        let product = Product {
            image_urls: vec![],
            ..sample()
        };
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn out_of_stock_products_cannot_be_inquired() {
        let mut product = sample();
        assert!(product.can_be_inquired());

        product.stock_status = StockStatus::OutOfStock;
        assert!(!product.can_be_inquired());

        product.stock_status = StockStatus::MadeToOrder;
        assert!(product.can_be_inquired());
    }
}
