//! Storefront application layer.
//!
//! Wires the catalog read-side and the inquiry cart into one session-scoped
//! handle. Domain crates stay free of logging; state transitions are traced
//! here.

pub mod session;

pub use session::StorefrontSession;
