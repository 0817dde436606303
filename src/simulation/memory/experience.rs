//! Aggregated experience: how often each outcome followed each action in
//! each situation.
//!
//! Counts are nested three levels deep (situation → action → outcome) and
//! only ever grow. Transition probabilities come straight from the counts,
//! together with the half-width of a 95% binomial confidence interval so
//! callers can tell a well-sampled estimate from a lucky guess.

use crate::simulation::params::Z_95;
use crate::simulation::vectors::{ActuatorVector, SensoryVector, SituationKey};
use std::collections::BTreeMap;

/// A transition probability with its uncertainty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Likelihood {
    /// Point estimate in [0, 1]
    pub p: f64,
    /// Half-width of the 95% confidence interval, in [0, 1]
    pub ci: f64,
}

impl Likelihood {
    /// The answer for a pair that has never been tried.
    pub const NO_EVIDENCE: Self = Self { p: 0.0, ci: 1.0 };

    /// Computes the estimate from an outcome count out of `n` trials.
    #[must_use]
    pub fn from_counts(outcome_count: u64, n: u64) -> Self {
        if n == 0 {
            return Self::NO_EVIDENCE;
        }
        let p = outcome_count as f64 / n as f64;
        let ci = (2.0 * Z_95 * (p * (1.0 - p) / n as f64).sqrt()).min(1.0);
        Self { p, ci }
    }

    /// Point estimate plus interval, capped at 1.
    #[must_use]
    pub fn optimistic(&self) -> f64 {
        (self.p + self.ci).min(1.0)
    }
}

#[derive(Clone, Debug)]
struct OutcomeRecord {
    sensors: SensoryVector,
    count: u64,
}

#[derive(Clone, Debug)]
struct ActionRecord {
    actuators: ActuatorVector,
    count: u64,
    outcomes: BTreeMap<SituationKey, OutcomeRecord>,
}

#[derive(Clone, Debug)]
struct SituationRecord {
    count: u64,
    responses: BTreeMap<SituationKey, ActionRecord>,
}

/// Database of situations encountered, actions tried and outcomes observed.
#[derive(Clone, Debug, Default)]
pub struct ExperienceStore {
    situations: BTreeMap<SituationKey, SituationRecord>,
    total: u64,
}

impl ExperienceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `outcome` followed `action` in `situation`, `magnitude` times.
    pub fn add(
        &mut self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
        magnitude: u64,
    ) {
        let situation_record = self
            .situations
            .entry(situation.key())
            .or_insert_with(|| SituationRecord {
                count: 0,
                responses: BTreeMap::new(),
            });
        let action_record = situation_record
            .responses
            .entry(action.key())
            .or_insert_with(|| ActionRecord {
                actuators: action.clone(),
                count: 0,
                outcomes: BTreeMap::new(),
            });
        let outcome_record = action_record
            .outcomes
            .entry(outcome.key())
            .or_insert_with(|| OutcomeRecord {
                sensors: outcome.clone(),
                count: 0,
            });

        outcome_record.count += magnitude;
        action_record.count += magnitude;
        situation_record.count += magnitude;
        self.total += magnitude;
    }

    /// Records a single observation.
    pub fn add_one(
        &mut self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
    ) {
        self.add(situation, action, outcome, 1);
    }

    /// Probability that `action` in `situation` leads to `outcome`.
    ///
    /// An unseen (situation, action) pair yields `Likelihood::NO_EVIDENCE`.
    #[must_use]
    pub fn transition_probability(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
    ) -> Likelihood {
        match self.action_record(situation, action) {
            Some(record) => {
                let count = record.outcomes.get(&outcome.key()).map_or(0, |o| o.count);
                Likelihood::from_counts(count, record.count)
            }
            None => Likelihood::NO_EVIDENCE,
        }
    }

    /// Every outcome observed after `action` in `situation` whose probability
    /// reaches `prob_threshold`, most probable first.
    #[must_use]
    pub fn known_outcomes(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        prob_threshold: f64,
    ) -> Vec<(SensoryVector, Likelihood)> {
        let Some(record) = self.action_record(situation, action) else {
            return Vec::new();
        };

        let mut outcomes: Vec<_> = record
            .outcomes
            .values()
            .map(|o| (o.sensors.clone(), Likelihood::from_counts(o.count, record.count)))
            .filter(|(_, likelihood)| likelihood.p >= prob_threshold)
            .collect();
        outcomes.sort_by(|a, b| b.1.p.total_cmp(&a.1.p));
        outcomes
    }

    /// Every action ever attempted in `situation`.
    #[must_use]
    pub fn known_actions(&self, situation: &SensoryVector) -> Vec<ActuatorVector> {
        self.situations
            .get(&situation.key())
            .map(|record| {
                record
                    .responses
                    .values()
                    .map(|a| a.actuators.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total observations in `situation`, over all actions.
    #[must_use]
    pub fn situation_count(&self, situation: &SensoryVector) -> u64 {
        self.situations
            .get(&situation.key())
            .map_or(0, |record| record.count)
    }

    /// Total observations of `action` in `situation`, over all outcomes.
    #[must_use]
    pub fn action_count(&self, situation: &SensoryVector, action: &ActuatorVector) -> u64 {
        self.action_record(situation, action)
            .map_or(0, |record| record.count)
    }

    #[must_use]
    pub fn outcome_count(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
        outcome: &SensoryVector,
    ) -> u64 {
        self.action_record(situation, action)
            .and_then(|record| record.outcomes.get(&outcome.key()))
            .map_or(0, |o| o.count)
    }

    /// Number of distinct situations seen.
    #[must_use]
    pub fn situations(&self) -> usize {
        self.situations.len()
    }

    /// Total number of observations recorded.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn action_record(
        &self,
        situation: &SensoryVector,
        action: &ActuatorVector,
    ) -> Option<&ActionRecord> {
        self.situations
            .get(&situation.key())
            .and_then(|record| record.responses.get(&action.key()))
    }
}
