//! Domain event trait.

use chrono::{DateTime, Utc};

/// A domain event: the observable record of a state transition.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
///
/// In this core they double as the notifications a UI observer consumes to
/// re-render after each cart or catalog state transition.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inquiry.cart.item_added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
