//! Candidate consequences of an action, ranked by optimistic probability.
//!
//! Known outcomes are seeded from experience and topped up with random
//! hypotheses so that unseen consequences stay discoverable. Each candidate
//! is ranked by its optimistic score (point estimate plus confidence
//! half-width), which favors outcomes that are plausible but under-sampled.

use crate::error::PlanningError;
use crate::simulation::config::OutcomeGeneratorParams;
use crate::simulation::memory::Likelihood;
use crate::simulation::planning::context::SearchContext;
use crate::simulation::planning::ActionSearch;
use crate::simulation::vectors::{ActuatorVector, SensoryVector};
use log::trace;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

/// One hypothesized consequence of an action.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateOutcome {
    pub sensors: SensoryVector,
    /// Point estimate of the transition probability
    pub probability: f64,
    /// Half-width of its 95% confidence interval
    pub ci: f64,
    /// `min(probability + ci, 1)`
    pub optimistic: f64,
    /// Utility of reaching this state, possibly refined by lookahead
    pub absolute_utility: f64,
    /// `absolute_utility * optimistic`
    pub weighted_utility: f64,
}

impl CandidateOutcome {
    #[must_use]
    pub fn new(sensors: SensoryVector, likelihood: Likelihood) -> Self {
        Self {
            sensors,
            probability: likelihood.p,
            ci: likelihood.ci,
            optimistic: likelihood.optimistic(),
            absolute_utility: 0.0,
            weighted_utility: 0.0,
        }
    }
}

impl fmt::Display for CandidateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:3.0}% ±{:.2} ${:.2} = ${:.2})",
            self.sensors,
            self.probability * 100.0,
            self.ci,
            self.absolute_utility,
            self.weighted_utility
        )
    }
}

/// Proposes and scores the probable consequences of an action.
#[derive(Clone, Debug)]
pub struct OutcomeGenerator {
    params: OutcomeGeneratorParams,
}

impl OutcomeGenerator {
    #[must_use]
    pub const fn new(params: OutcomeGeneratorParams) -> Self {
        Self { params }
    }

    /// Ranked consequences of taking `action` in `prior`.
    ///
    /// Candidates whose own utility falls short of the recursion threshold
    /// are expanded through `actions` one level shallower, unless the
    /// lookahead cache already holds that state at this depth.
    ///
    /// # Errors
    ///
    /// Propagates `PlanningError::RecursionBudgetExceeded` from the search.
    pub fn generate(
        &self,
        ctx: &mut SearchContext<'_>,
        actions: &impl ActionSearch,
        prior: &SensoryVector,
        action: &ActuatorVector,
        depth: u32,
    ) -> Result<Vec<CandidateOutcome>, PlanningError> {
        let mut pool = self.candidate_pool(ctx, prior, action);

        pool.shuffle(ctx.rng);
        pool.sort_by(|a, b| b.optimistic.total_cmp(&a.optimistic));
        pool.retain(|c| c.optimistic >= self.params.prob_threshold);
        pool.truncate(self.params.num_keep);

        for candidate in &mut pool {
            candidate.absolute_utility = ctx.utility.utility(&candidate.sensors);

            if candidate.absolute_utility < self.params.recursion_threshold
                && depth > 0
                && ctx.cache.get(&candidate.sensors, depth).is_none()
            {
                candidate.absolute_utility = Self::look_ahead(ctx, actions, &candidate.sensors, depth)?
                    .unwrap_or(candidate.absolute_utility);
            }

            candidate.weighted_utility = candidate.absolute_utility * candidate.optimistic;
        }

        Ok(pool)
    }

    /// Known outcomes first, then deduplicated random hypotheses.
    fn candidate_pool(
        &self,
        ctx: &mut SearchContext<'_>,
        prior: &SensoryVector,
        action: &ActuatorVector,
    ) -> Vec<CandidateOutcome> {
        let mut seen = HashSet::new();
        let mut pool = Vec::with_capacity(self.params.num_generate);

        for (sensors, likelihood) in ctx.estimator.known_outcomes(prior, action) {
            if seen.insert(sensors.key()) {
                pool.push(CandidateOutcome::new(sensors, likelihood));
            }
        }

        for _ in 0..self.params.num_generate {
            let sensors = SensoryVector::random_uniform(ctx.n_sensors, ctx.rng);
            if !seen.insert(sensors.key()) {
                continue;
            }
            let likelihood = ctx.estimator.estimate(prior, action, &sensors);
            pool.push(CandidateOutcome::new(sensors, likelihood));
        }

        pool
    }

    /// Searches one level below `depth` from `situation` and records the
    /// best action found. Returns `None` when no action was proposed.
    fn look_ahead(
        ctx: &mut SearchContext<'_>,
        actions: &impl ActionSearch,
        situation: &SensoryVector,
        depth: u32,
    ) -> Result<Option<f64>, PlanningError> {
        let next_depth = depth
            .checked_sub(1)
            .ok_or(PlanningError::RecursionBudgetExceeded)?;
        ctx.expansions += 1;

        let best = actions.actions(ctx, situation, next_depth)?.into_iter().next();
        let Some(best) = best else {
            return Ok(None);
        };

        let utility = best.expected_utility.min(1.0);
        trace!("lookahead {situation} @{depth}: {} -> {utility:.3}", best.actuators);
        ctx.cache.put(situation, best.actuators, utility, depth);
        Ok(Some(utility))
    }
}
