//! Outcome likelihood estimation and utility scoring.
//!
//! The planner never reads the experience store directly. It asks an
//! `OutcomeLikelihoodEstimator`, so a learned regressor can stand in for
//! the frequency counts without touching the search.

use crate::simulation::memory::{ExperienceStore, Likelihood};
use crate::simulation::vectors::{ActuatorVector, SensoryVector};

/// Estimates how likely a sensory outcome is after an action.
pub trait OutcomeLikelihoodEstimator {
    /// Probability and confidence half-width of `outcome` following `action`
    /// in `situation`.
    fn estimate(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
    ) -> Likelihood;

    /// Outcomes already associated with the pair, most probable first.
    fn known_outcomes(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
    ) -> Vec<(SensoryVector, Likelihood)>;

    /// Actions already attempted in `situation`.
    fn known_actions(&self, situation: &SensoryVector) -> Vec<ActuatorVector>;
}

/// Estimator backed by the experience store's frequency counts.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyEstimator<'a> {
    store: &'a ExperienceStore,
}

impl<'a> FrequencyEstimator<'a> {
    #[must_use]
    pub const fn new(store: &'a ExperienceStore) -> Self {
        Self { store }
    }
}

impl OutcomeLikelihoodEstimator for FrequencyEstimator<'_> {
    fn estimate(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
    ) -> Likelihood {
        self.store.transition_probability(situation, action, outcome)
    }

    fn known_outcomes(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
    ) -> Vec<(SensoryVector, Likelihood)> {
        self.store.known_outcomes(situation, action, 0.0)
    }

    fn known_actions(&self, situation: &SensoryVector) -> Vec<ActuatorVector> {
        self.store.known_actions(situation)
    }
}

/// Pure scoring of a sensory state, in [0, 1].
pub trait UtilityMetric {
    fn utility(&self, sensors: &SensoryVector) -> f64;
}

impl<F> UtilityMetric for F
where
    F: Fn(&SensoryVector) -> f64,
{
    fn utility(&self, sensors: &SensoryVector) -> f64 {
        self(sensors)
    }
}

/// Reads one designated sensor as the utility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexUtility {
    pub index: usize,
}

impl UtilityMetric for IndexUtility {
    fn utility(&self, sensors: &SensoryVector) -> f64 {
        if sensors.get(self.index).unwrap_or(false) {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_estimator_delegates() {
        let mut store = ExperienceStore::new();
        let s = SensoryVector::from_bits(&[1, 0]);
        let a = ActuatorVector::from_bits(&[1]);
        let o = SensoryVector::from_bits(&[0, 1]);
        store.add(&s, &a, &o, 2);

        let estimator = FrequencyEstimator::new(&store);
        assert!((estimator.estimate(&s, &a, &o).p - 1.0).abs() < 1e-12);
        assert_eq!(estimator.known_outcomes(&s, &a).len(), 1);
        assert_eq!(estimator.known_actions(&s), vec![a]);
    }

    #[test]
    fn test_index_utility() {
        let metric = IndexUtility { index: 2 };
        assert!((metric.utility(&SensoryVector::from_bits(&[0, 0, 1])) - 1.0).abs() < 1e-12);
        assert!(metric.utility(&SensoryVector::from_bits(&[1, 1, 0])).abs() < 1e-12);
        assert!(metric.utility(&SensoryVector::from_bits(&[1])).abs() < 1e-12);
    }

    #[test]
    fn test_closure_utility() {
        let metric = |s: &SensoryVector| s.count_active() as f64 / s.len() as f64;
        assert!((metric.utility(&SensoryVector::from_bits(&[1, 0, 1, 0])) - 0.5).abs() < 1e-12);
    }
}
