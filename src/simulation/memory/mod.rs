//! Memory systems for the planning organism.
//!
//! This module provides:
//! - Long-term memory of observed transitions (the experience store)
//! - Short-lived memo of lookahead results within one decision

pub mod experience;
pub mod lookahead;

pub use experience::{ExperienceStore, Likelihood};
pub use lookahead::{LookaheadCache, LookaheadEntry};
