//! Inquiry domain module.
//!
//! The customer-assembled inquiry cart (a quote request, not a paid order)
//! and checkout preparation, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod cart;
pub mod checkout;

pub use cart::{
    AddItem, CartCleared, ClearCart, InquiryCart, InquiryCartCommand, InquiryCartEvent,
    InquiryId, InquiryItem, ItemAdded, ItemRemoved, QuantityUpdated, RemoveItem, SetQuantity,
};
pub use checkout::{
    CheckoutError, CheckoutIssue, ContactFields, FLAT_SHIPPING_FEE, OrderLine, OutboundOrder,
    prepare, prepare_with_shipping,
};
