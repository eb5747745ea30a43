//! Content domain: default catalog, reconciliation, classification, and the
//! derived views (pricing, scheduling, validation) built on top of it.
//!
//! Pure logic throughout. The snapshot cache is the one part that touches
//! the filesystem, and it owns its directory explicitly.

pub mod cache;
pub mod classify;
pub mod defaults;
pub mod model;
pub mod pricing;
pub mod reconcile;
pub mod schedule;
pub mod validate;
