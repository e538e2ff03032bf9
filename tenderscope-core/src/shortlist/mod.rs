//! Optimistic shortlist toggling with best-effort rollback.

pub mod optimistic;


pub use optimistic::{OptimisticShortlist, Reconciliation};
