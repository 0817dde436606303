//! Candidate actions and their expected utilities.

use crate::error::PlanningError;
use crate::simulation::config::ActionGeneratorParams;
use crate::simulation::planning::context::SearchContext;
use crate::simulation::planning::outcome::CandidateOutcome;
use crate::simulation::planning::OutcomeSearch;
use crate::simulation::vectors::{ActuatorVector, SensoryVector};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

/// An action under consideration and its evaluated consequences.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateAction {
    pub actuators: ActuatorVector,
    pub outcomes: Vec<CandidateOutcome>,
    pub expected_utility: f64,
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ACTION {} ${:.3} (-> {} outcomes)",
            self.actuators,
            self.expected_utility,
            self.outcomes.len()
        )
    }
}

/// Proposes actions for a situation and ranks them by expected utility.
#[derive(Clone, Debug)]
pub struct ActionGenerator {
    params: ActionGeneratorParams,
}

impl ActionGenerator {
    #[must_use]
    pub const fn new(params: ActionGeneratorParams) -> Self {
        Self { params }
    }

    /// Ranked candidate actions for `situation`, best first.
    ///
    /// Actions already tried there are always considered; random sparse
    /// actions are added on top.
    ///
    /// # Errors
    ///
    /// Propagates errors from outcome evaluation.
    pub fn generate(
        &self,
        ctx: &mut SearchContext<'_>,
        outcomes: &impl OutcomeSearch,
        situation: &SensoryVector,
        depth: u32,
    ) -> Result<Vec<CandidateAction>, PlanningError> {
        let proposals = self.proposals(ctx, situation);

        let mut candidates = Vec::with_capacity(proposals.len());
        for actuators in proposals {
            candidates.push(self.evaluate(ctx, outcomes, situation, actuators, depth)?);
        }

        candidates.shuffle(ctx.rng);
        candidates.sort_by(|a, b| b.expected_utility.total_cmp(&a.expected_utility));
        candidates.truncate(self.params.num_keep);
        Ok(candidates)
    }

    /// Scores a single action by the decayed sum of its outcomes' weighted
    /// utilities. An action with no plausible outcomes gets the curiosity
    /// floor instead of zero.
    ///
    /// # Errors
    ///
    /// Propagates errors from outcome evaluation.
    pub fn evaluate(
        &self,
        ctx: &mut SearchContext<'_>,
        outcomes: &impl OutcomeSearch,
        situation: &SensoryVector,
        actuators: ActuatorVector,
        depth: u32,
    ) -> Result<CandidateAction, PlanningError> {
        let consequences = outcomes.outcomes(ctx, situation, &actuators, depth)?;

        let expected_utility = if consequences.is_empty() {
            self.params.curiosity_utility
        } else {
            self.params.decay * consequences.iter().map(|c| c.weighted_utility).sum::<f64>()
        };

        Ok(CandidateAction {
            actuators,
            outcomes: consequences,
            expected_utility,
        })
    }

    fn proposals(&self, ctx: &mut SearchContext<'_>, situation: &SensoryVector) -> Vec<ActuatorVector> {
        let mut seen = HashSet::new();
        let mut proposals: Vec<ActuatorVector> = ctx
            .estimator
            .known_actions(situation)
            .into_iter()
            .filter(|a| seen.insert(a.key()))
            .collect();

        for _ in 0..self.params.num_generate {
            let actuators = ActuatorVector::random_sparse(
                ctx.n_actuators,
                self.params.activity_mean,
                self.params.activity_stdev,
                ctx.rng,
            );
            if seen.insert(actuators.key()) {
                proposals.push(actuators);
            }
        }
        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::memory::{ExperienceStore, Likelihood, LookaheadCache};
    use crate::simulation::planning::estimator::{FrequencyEstimator, IndexUtility};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Returns one outcome whose weighted utility equals the number of
    /// active actuator bits, or nothing for the all-zero action.
    struct FakeOutcomes {
        calls: Cell<usize>,
    }

    impl OutcomeSearch for FakeOutcomes {
        fn outcomes(
            &self,
            _ctx: &mut SearchContext<'_>,
            _prior: &SensoryVector,
            action: &ActuatorVector,
            _depth: u32,
        ) -> Result<Vec<CandidateOutcome>, PlanningError> {
            self.calls.set(self.calls.get() + 1);
            let active = action.count_active();
            if active == 0 {
                return Ok(Vec::new());
            }
            let mut outcome =
                CandidateOutcome::new(SensoryVector::from_bits(&[1]), Likelihood { p: 1.0, ci: 0.0 });
            outcome.absolute_utility = active as f64;
            outcome.weighted_utility = active as f64;
            Ok(vec![outcome])
        }
    }

    fn params() -> ActionGeneratorParams {
        ActionGeneratorParams {
            num_generate: 30,
            num_keep: 3,
            activity_mean: 1.0,
            activity_stdev: 2.0,
            decay: 0.5,
            curiosity_utility: 0.01,
        }
    }

    #[test]
    fn test_ranked_and_truncated() {
        let store = ExperienceStore::new();
        let estimator = FrequencyEstimator::new(&store);
        let utility = IndexUtility { index: 0 };
        let mut cache = LookaheadCache::new();
        let mut rng = StdRng::seed_from_u64(21);
        let mut ctx = SearchContext::new(&estimator, &utility, &mut cache, &mut rng, 1, 3);

        let generator = ActionGenerator::new(params());
        let fake = FakeOutcomes { calls: Cell::new(0) };
        let actions = generator
            .generate(&mut ctx, &fake, &SensoryVector::from_bits(&[0]), 1)
            .unwrap();

        assert!(actions.len() <= 3);
        assert!(!actions.is_empty());
        assert!(actions
            .windows(2)
            .all(|w| w[0].expected_utility >= w[1].expected_utility));
        let keys: HashSet<_> = actions.iter().map(|a| a.actuators.key()).collect();
        assert_eq!(keys.len(), actions.len());
    }

    #[test]
    fn test_expected_utility_is_decayed_sum() {
        let store = ExperienceStore::new();
        let estimator = FrequencyEstimator::new(&store);
        let utility = IndexUtility { index: 0 };
        let mut cache = LookaheadCache::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = SearchContext::new(&estimator, &utility, &mut cache, &mut rng, 1, 3);

        let generator = ActionGenerator::new(params());
        let fake = FakeOutcomes { calls: Cell::new(0) };
        let action = generator
            .evaluate(
                &mut ctx,
                &fake,
                &SensoryVector::from_bits(&[0]),
                ActuatorVector::from_bits(&[1, 1, 0]),
                0,
            )
            .unwrap();

        assert!((action.expected_utility - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_outcomes_get_curiosity_floor() {
        let store = ExperienceStore::new();
        let estimator = FrequencyEstimator::new(&store);
        let utility = IndexUtility { index: 0 };
        let mut cache = LookaheadCache::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = SearchContext::new(&estimator, &utility, &mut cache, &mut rng, 1, 3);

        let generator = ActionGenerator::new(params());
        let fake = FakeOutcomes { calls: Cell::new(0) };
        let action = generator
            .evaluate(
                &mut ctx,
                &fake,
                &SensoryVector::from_bits(&[0]),
                ActuatorVector::zeros(3),
                0,
            )
            .unwrap();

        assert!(action.outcomes.is_empty());
        assert!((action.expected_utility - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_known_actions_are_always_proposed() {
        let mut store = ExperienceStore::new();
        let situation = SensoryVector::from_bits(&[1]);
        let known = ActuatorVector::from_bits(&[0, 0, 1]);
        store.add_one(&situation, &known, &SensoryVector::from_bits(&[0]));

        let estimator = FrequencyEstimator::new(&store);
        let utility = IndexUtility { index: 0 };
        let mut cache = LookaheadCache::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut ctx = SearchContext::new(&estimator, &utility, &mut cache, &mut rng, 1, 3);

        let mut p = params();
        p.num_generate = 0;
        let generator = ActionGenerator::new(p);
        let fake = FakeOutcomes { calls: Cell::new(0) };
        let actions = generator.generate(&mut ctx, &fake, &situation, 0).unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].actuators, known);
        assert_eq!(fake.calls.get(), 1);
    }
}
