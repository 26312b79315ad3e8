//! Pricing Engine Module
//!
//! Pure, deterministic computation from a cart snapshot to a pricing result.
//! Recomputed in full on every cart mutation; no incremental or cached state.

mod calculator;

pub use calculator::*;
