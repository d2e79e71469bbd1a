//! InquiryCheckout: validate the cart + contact fields and serialize the
//! outbound order record.
//!
//! Preparation is all-or-nothing: a failed validation reports **every**
//! failing field at once and produces no partial order. Delivery of the
//! prepared record (mail, persistence) belongs to an external collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use coldfront_core::ValueObject;

use crate::cart::InquiryCart;

/// Flat delivery charge added to every prepared order, in smallest currency
/// units. Callers with a different quote use [`prepare_with_shipping`].
pub const FLAT_SHIPPING_FEE: u64 = 1_500_00;

/// Contact and shipping details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

impl ValueObject for ContactFields {}

/// One failing field with a user-displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutIssue {
    pub field: String,
    pub message: String,
}

impl CheckoutIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Checkout validation failure carrying every failing field, so the caller
/// can display all problems at once. Recoverable by re-prompting the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("inquiry checkout rejected ({} issue(s))", .issues.len())]
pub struct CheckoutError {
    pub issues: Vec<CheckoutIssue>,
}

impl CheckoutError {
    pub fn mentions_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

/// One line of the outbound order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_name: String,
    pub quantity: u32,
    /// Line total in smallest currency units.
    pub line_total: u64,
}

/// The validated, serialized result of checkout preparation: an immutable
/// snapshot handed to the submission collaborator for persistence and/or
/// notification delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundOrder {
    pub contact: ContactFields,
    pub lines: Vec<OrderLine>,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
    pub prepared_at: DateTime<Utc>,
}

/// Prepare an outbound order with the flat shipping charge.
pub fn prepare(cart: &InquiryCart, contact: &ContactFields) -> Result<OutboundOrder, CheckoutError> {
    prepare_with_shipping(cart, contact, FLAT_SHIPPING_FEE)
}

/// Prepare an outbound order with an explicit shipping charge.
pub fn prepare_with_shipping(
    cart: &InquiryCart,
    contact: &ContactFields,
    shipping_fee: u64,
) -> Result<OutboundOrder, CheckoutError> {
    let mut issues = Vec::new();

    if cart.is_empty() {
        issues.push(CheckoutIssue::new("cart", "cart is empty"));
    }
    if contact.name.trim().is_empty() {
        issues.push(CheckoutIssue::new("name", "name cannot be empty"));
    }
    if !is_valid_email(&contact.email) {
        issues.push(CheckoutIssue::new("email", "email address is not valid"));
    }
    if contact.address.trim().is_empty() {
        issues.push(CheckoutIssue::new("address", "address cannot be empty"));
    }
    if contact.city.trim().is_empty() {
        issues.push(CheckoutIssue::new("city", "city cannot be empty"));
    }
    if contact.province.trim().is_empty() {
        issues.push(CheckoutIssue::new("province", "province cannot be empty"));
    }
    if contact.postal_code.trim().is_empty() {
        issues.push(CheckoutIssue::new("postal_code", "postal code cannot be empty"));
    }

    if !issues.is_empty() {
        return Err(CheckoutError { issues });
    }

    let lines: Vec<OrderLine> = cart
        .items()
        .iter()
        .map(|item| OrderLine {
            product_name: item.product.name.clone(),
            quantity: item.quantity,
            line_total: item.line_total(),
        })
        .collect();

    let subtotal = cart.subtotal();

    Ok(OutboundOrder {
        contact: contact.clone(),
        lines,
        subtotal,
        shipping_fee,
        total: subtotal.saturating_add(shipping_fee),
        prepared_at: Utc::now(),
    })
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
/// Deliverability is the notification collaborator's problem.
fn is_valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
