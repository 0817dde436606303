//! Action–outcome planning.
//!
//! This module provides:
//! - Outcome likelihood estimation over the experience store
//! - Candidate outcome generation with optimistic ranking
//! - Candidate action generation and scoring
//! - Depth-bounded mutual recursion between the two generators
//!
//! The two generators never call each other directly. Each receives the
//! other side through a trait (`ActionSearch`, `OutcomeSearch`), and
//! `Planner` closes the loop by implementing both.

mod action;
mod context;
mod estimator;
mod outcome;

pub use action::{ActionGenerator, CandidateAction};
pub use context::SearchContext;
pub use estimator::{FrequencyEstimator, IndexUtility, OutcomeLikelihoodEstimator, UtilityMetric};
pub use outcome::{CandidateOutcome, OutcomeGenerator};

use crate::error::PlanningError;
use crate::simulation::config::PlannerConfig;
use crate::simulation::vectors::{ActuatorVector, SensoryVector};
use log::debug;

/// Produces ranked candidate actions for a situation.
pub trait ActionSearch {
    /// # Errors
    ///
    /// Returns any error raised while evaluating outcomes.
    fn actions(
        &self,
        ctx: &mut SearchContext<'_>,
        situation: &SensoryVector,
        depth: u32,
    ) -> Result<Vec<CandidateAction>, PlanningError>;
}

/// Produces ranked candidate outcomes for an action.
pub trait OutcomeSearch {
    /// # Errors
    ///
    /// Returns any error raised while looking ahead.
    fn outcomes(
        &self,
        ctx: &mut SearchContext<'_>,
        prior: &SensoryVector,
        action: &ActuatorVector,
        depth: u32,
    ) -> Result<Vec<CandidateOutcome>, PlanningError>;
}

/// Both generators wired into one recursive search.
#[derive(Clone, Debug)]
pub struct Planner {
    actions: ActionGenerator,
    outcomes: OutcomeGenerator,
}

impl Planner {
    #[must_use]
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            actions: ActionGenerator::new(config.actions.clone()),
            outcomes: OutcomeGenerator::new(config.outcomes.clone()),
        }
    }

    /// Runs one top-level decision from `situation`, best action first.
    ///
    /// Clears the lookahead cache before searching.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::RecursionBudgetExceeded` if the search ever
    /// tries to descend below depth zero.
    pub fn plan(
        &self,
        ctx: &mut SearchContext<'_>,
        situation: &SensoryVector,
        depth: u32,
    ) -> Result<Vec<CandidateAction>, PlanningError> {
        ctx.cache.clear();
        ctx.expansions = 0;
        let candidates = self.actions(ctx, situation, depth)?;
        debug!(
            "planned {situation} @{depth}: {} candidates, {} expansions, {} cached",
            candidates.len(),
            ctx.expansions,
            ctx.cache.len()
        );
        Ok(candidates)
    }

    /// Evaluates one given action as a top-level decision.
    ///
    /// # Errors
    ///
    /// Same as [`Planner::plan`].
    pub fn evaluate(
        &self,
        ctx: &mut SearchContext<'_>,
        situation: &SensoryVector,
        actuators: ActuatorVector,
        depth: u32,
    ) -> Result<CandidateAction, PlanningError> {
        ctx.cache.clear();
        ctx.expansions = 0;
        self.actions.evaluate(ctx, self, situation, actuators, depth)
    }
}

impl ActionSearch for Planner {
    fn actions(
        &self,
        ctx: &mut SearchContext<'_>,
        situation: &SensoryVector,
        depth: u32,
    ) -> Result<Vec<CandidateAction>, PlanningError> {
        self.actions.generate(ctx, self, situation, depth)
    }
}

impl OutcomeSearch for Planner {
    fn outcomes(
        &self,
        ctx: &mut SearchContext<'_>,
        prior: &SensoryVector,
        action: &ActuatorVector,
        depth: u32,
    ) -> Result<Vec<CandidateOutcome>, PlanningError> {
        self.outcomes.generate(ctx, self, prior, action, depth)
    }
}
