//! Shared state threaded through one recursive search.

use crate::simulation::memory::LookaheadCache;
use crate::simulation::planning::estimator::{OutcomeLikelihoodEstimator, UtilityMetric};
use rand::rngs::StdRng;

/// Everything a search needs besides the generators themselves.
///
/// Borrowed for the duration of one decision. Cache writes from deeper
/// recursion are visible to every sibling expanded afterwards.
pub struct SearchContext<'a> {
    pub estimator: &'a dyn OutcomeLikelihoodEstimator,
    pub utility: &'a dyn UtilityMetric,
    pub cache: &'a mut LookaheadCache,
    pub rng: &'a mut StdRng,
    pub n_sensors: usize,
    pub n_actuators: usize,
    /// Number of situations expanded by recursion so far
    pub expansions: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        estimator: &'a dyn OutcomeLikelihoodEstimator,
        utility: &'a dyn UtilityMetric,
        cache: &'a mut LookaheadCache,
        rng: &'a mut StdRng,
        n_sensors: usize,
        n_actuators: usize,
    ) -> Self {
        Self {
            estimator,
            utility,
            cache,
            rng,
            n_sensors,
            n_actuators,
            expansions: 0,
        }
    }
}
