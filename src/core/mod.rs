//! Core business logic.
//!
//! Everything in here is a pure, synchronous function over plain data:
//! no I/O, no clocks, no storage. The persistence layer feeds these
//! functions; the CLI formats their results.

/// Alert derivation - expiration, stock-level, and water-shortage alerts
pub mod alerts;
/// Recommended-quantity engine and water requirement math
pub mod recommend;
/// Shopping-list derivation for the plain-text export
pub mod shopping;
