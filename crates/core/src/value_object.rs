//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two with the
/// same attribute values are the same value. A filter selection, a price
/// range, or a set of contact fields has no identity of its own; "modifying"
/// one means constructing a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
