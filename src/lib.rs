//! An organism that learns what its actions do and plans with it.
//!
//! Experience is kept as frequency counts of (situation, action, outcome)
//! transitions. Each decision proposes candidate actions, predicts their
//! likely outcomes with optimistic confidence bounds, and looks ahead a
//! bounded number of steps through the hypothetical states, memoizing
//! repeated sub-searches along the way.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::collapsible_if)]

pub mod error;
pub mod simulation;
pub mod ui;

pub use error::{ConfigError, PlanningError};
