//! The organism: owns the planner and its memories, and plays a game.
//!
//! Each turn follows the same cycle. Sensor input arrives, closing out the
//! previous turn by recording what the last action led to. Then the planner
//! picks an action, which the organism commits to until the next input.

use crate::error::{ConfigError, PlanningError};
use crate::simulation::config::PlannerConfig;
use crate::simulation::memory::{ExperienceStore, LookaheadCache};
use crate::simulation::params::STORE_SIZE_WARNING;
use crate::simulation::planning::{
    CandidateAction, FrequencyEstimator, IndexUtility, Planner, SearchContext, UtilityMetric,
};
use crate::simulation::vectors::{ActuatorVector, SensoryVector};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where the organism is in its sense–act cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrganismState {
    /// No action committed
    Idle,
    /// An action was committed and its outcome has not been observed yet
    AwaitingOutcome,
}

/// Housekeeping run between games.
pub trait MaintenancePolicy {
    fn maintain(&mut self, store: &mut ExperienceStore);
}

/// Warns once when the experience store grows past a record count.
#[derive(Clone, Debug)]
pub struct StoreSizeWatch {
    max_records: u64,
    warned: bool,
}

impl StoreSizeWatch {
    #[must_use]
    pub const fn new(max_records: u64) -> Self {
        Self {
            max_records,
            warned: false,
        }
    }

    #[must_use]
    pub const fn warned(&self) -> bool {
        self.warned
    }
}

impl Default for StoreSizeWatch {
    fn default() -> Self {
        Self::new(STORE_SIZE_WARNING as u64)
    }
}

impl MaintenancePolicy for StoreSizeWatch {
    fn maintain(&mut self, store: &mut ExperienceStore) {
        if !self.warned && store.len() > self.max_records {
            warn!(
                "experience store holds {} records across {} situations (limit {})",
                store.len(),
                store.situations(),
                self.max_records
            );
            self.warned = true;
        }
    }
}

/// An agent that learns action outcomes by playing, and plans with them.
pub struct Organism {
    config: PlannerConfig,
    planner: Planner,
    utility: Box<dyn UtilityMetric>,
    experience: ExperienceStore,
    cache: LookaheadCache,
    rng: StdRng,
    situation: Option<SensoryVector>,
    pending: Option<CandidateAction>,
    maintenance: Option<Box<dyn MaintenancePolicy>>,
    decisions: u64,
}

impl Organism {
    /// Builds an organism from a validated configuration.
    ///
    /// The utility metric reads `config.utility_index`; no maintenance
    /// policy is installed.
    ///
    /// # Errors
    ///
    /// Returns the first configuration constraint violated.
    pub fn configure(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = config
            .seed
            .map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
        let utility = IndexUtility {
            index: config.utility_index,
        };
        Ok(Self {
            planner: Planner::new(&config),
            utility: Box::new(utility),
            experience: ExperienceStore::new(),
            cache: LookaheadCache::new(),
            rng,
            situation: None,
            pending: None,
            maintenance: None,
            decisions: 0,
            config,
        })
    }

    /// Replaces the utility metric.
    #[must_use]
    pub fn with_utility(mut self, utility: impl UtilityMetric + 'static) -> Self {
        self.utility = Box::new(utility);
        self
    }

    /// Installs a maintenance policy.
    #[must_use]
    pub fn with_maintenance(mut self, policy: impl MaintenancePolicy + 'static) -> Self {
        self.maintenance = Some(Box::new(policy));
        self
    }

    /// Forgets the current situation and any pending action, keeping experience.
    pub fn reset_state(&mut self) {
        self.situation = None;
        self.pending = None;
    }

    /// Takes in a new sensor reading.
    ///
    /// If an action is pending from a known situation, the transition is
    /// recorded as experience first.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::DimensionMismatch` for a wrong-length vector.
    pub fn handle_sensor_input(&mut self, sensors: SensoryVector) -> Result<(), PlanningError> {
        check_len("sensor", self.config.n_sensors, sensors.len())?;

        if let (Some(prior), Some(action)) = (self.situation.as_ref(), self.pending.as_ref()) {
            self.experience.add_one(prior, &action.actuators, &sensors);
            debug!(
                "learned {prior} -{}-> {sensors} ({} records)",
                action.actuators,
                self.experience.len()
            );
        }

        self.situation = Some(sensors);
        self.pending = None;
        Ok(())
    }

    /// Plans from the current situation and commits to the best action, or
    /// to `force_action` if given.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::NoSituation` before the first sensor input,
    /// `PlanningError::DimensionMismatch` for a wrong-length forced action,
    /// and any fatal search error.
    pub fn choose_action(
        &mut self,
        force_action: Option<ActuatorVector>,
    ) -> Result<CandidateAction, PlanningError> {
        let situation = self.situation.clone().ok_or(PlanningError::NoSituation)?;
        if let Some(forced) = &force_action {
            check_len("actuator", self.config.n_actuators, forced.len())?;
        }

        let estimator = FrequencyEstimator::new(&self.experience);
        let mut ctx = SearchContext::new(
            &estimator,
            self.utility.as_ref(),
            &mut self.cache,
            &mut self.rng,
            self.config.n_sensors,
            self.config.n_actuators,
        );
        let depth = self.config.recursion_depth;

        let chosen = match force_action {
            Some(forced) => self.planner.evaluate(&mut ctx, &situation, forced, depth)?,
            None => match self.planner.plan(&mut ctx, &situation, depth)?.into_iter().next() {
                Some(best) => best,
                None => {
                    let index = ctx.rng.random_range(0..self.config.n_actuators);
                    CandidateAction {
                        actuators: ActuatorVector::one_hot(self.config.n_actuators, index),
                        outcomes: Vec::new(),
                        expected_utility: 0.0,
                    }
                }
            },
        };

        self.decisions += 1;
        debug!("decision {} in {situation}: {chosen}", self.decisions);
        self.pending = Some(chosen.clone());
        Ok(chosen)
    }

    /// Runs the maintenance policy, if any.
    pub fn maintenance(&mut self) {
        if let Some(policy) = self.maintenance.as_mut() {
            policy.maintain(&mut self.experience);
        }
    }

    #[must_use]
    pub const fn state(&self) -> OrganismState {
        if self.pending.is_some() {
            OrganismState::AwaitingOutcome
        } else {
            OrganismState::Idle
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[must_use]
    pub const fn experience(&self) -> &ExperienceStore {
        &self.experience
    }

    #[must_use]
    pub const fn situation(&self) -> Option<&SensoryVector> {
        self.situation.as_ref()
    }

    #[must_use]
    pub const fn pending_action(&self) -> Option<&CandidateAction> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn decisions(&self) -> u64 {
        self.decisions
    }

    #[must_use]
    pub const fn has_maintenance(&self) -> bool {
        self.maintenance.is_some()
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), PlanningError> {
    if expected == got {
        Ok(())
    } else {
        Err(PlanningError::DimensionMismatch {
            what,
            expected,
            got,
        })
    }
}
