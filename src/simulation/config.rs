//! Immutable planner configuration, validated once at construction.

use crate::error::ConfigError;
use crate::simulation::environment::PlayerConfig;
use crate::simulation::params::{
    ACTIONS_PER_ACTUATOR, ACTION_NUM_KEEP, ACTIVITY_LEVEL_MEAN, ACTIVITY_LEVEL_STDEV,
    CURIOSITY_UTILITY, OUTCOME_NUM_GENERATE, OUTCOME_NUM_KEEP, OUTCOME_PROB_THRESHOLD, PLAN_DECAY,
    RECURSION_DEPTH, RECURSION_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// How candidate actions are proposed and scored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionGeneratorParams {
    /// Random actions to propose on top of the known ones
    pub num_generate: usize,
    /// Candidates kept after ranking
    pub num_keep: usize,
    /// Mean number of active bits in a random action
    pub activity_mean: f64,
    /// Standard deviation of the number of active bits
    pub activity_stdev: f64,
    /// Multiplier applied to every expected utility
    pub decay: f64,
    /// Utility given to an action with no plausible outcomes
    pub curiosity_utility: f64,
}

impl ActionGeneratorParams {
    #[must_use]
    pub fn for_actuators(n_actuators: usize) -> Self {
        Self {
            num_generate: n_actuators * ACTIONS_PER_ACTUATOR,
            num_keep: ACTION_NUM_KEEP,
            activity_mean: ACTIVITY_LEVEL_MEAN,
            activity_stdev: ACTIVITY_LEVEL_STDEV,
            decay: PLAN_DECAY,
            curiosity_utility: CURIOSITY_UTILITY,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.num_keep == 0 {
            return Err(ConfigError::ZeroKeep {
                what: "action generator",
            });
        }
        for (what, value) in [
            ("mean", self.activity_mean),
            ("stdev", self.activity_stdev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidActivity { what, value });
            }
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ConfigError::InvalidDecay(self.decay));
        }
        check_unit("curiosity utility", self.curiosity_utility)
    }
}

/// How candidate outcomes are proposed and filtered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeGeneratorParams {
    /// Random sensory vectors injected as hypotheses
    pub num_generate: usize,
    /// Candidates kept after ranking
    pub num_keep: usize,
    /// Minimum optimistic score for a candidate to survive
    pub prob_threshold: f64,
    /// Outcomes at or above this utility are not expanded further
    pub recursion_threshold: f64,
}

impl Default for OutcomeGeneratorParams {
    fn default() -> Self {
        Self {
            num_generate: OUTCOME_NUM_GENERATE,
            num_keep: OUTCOME_NUM_KEEP,
            prob_threshold: OUTCOME_PROB_THRESHOLD,
            recursion_threshold: RECURSION_THRESHOLD,
        }
    }
}

impl OutcomeGeneratorParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.num_keep == 0 {
            return Err(ConfigError::ZeroKeep {
                what: "outcome generator",
            });
        }
        check_unit("probability threshold", self.prob_threshold)?;
        check_unit("recursion threshold", self.recursion_threshold)
    }
}

/// Complete planner configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub n_sensors: usize,
    pub n_actuators: usize,
    /// Sensor index read by the default utility metric
    pub utility_index: usize,
    /// Lookahead depth of each top-level decision
    pub recursion_depth: u32,
    /// RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub actions: ActionGeneratorParams,
    #[serde(default)]
    pub outcomes: OutcomeGeneratorParams,
}

impl PlannerConfig {
    /// Default configuration for a game's vector layout.
    #[must_use]
    pub fn for_player(player: &PlayerConfig) -> Self {
        Self {
            n_sensors: player.n_sensors,
            n_actuators: player.n_actuators,
            utility_index: player.utility_index,
            recursion_depth: RECURSION_DEPTH,
            seed: None,
            actions: ActionGeneratorParams::for_actuators(player.n_actuators),
            outcomes: OutcomeGeneratorParams::default(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.recursion_depth = depth;
        self
    }

    /// Parses a JSON configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and any validation error.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter. Nothing is ever clamped.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_sensors == 0 {
            return Err(ConfigError::ZeroLength { what: "sensors" });
        }
        if self.n_actuators == 0 {
            return Err(ConfigError::ZeroLength { what: "actuators" });
        }
        if self.utility_index >= self.n_sensors {
            return Err(ConfigError::UtilityIndexOutOfRange {
                index: self.utility_index,
                n_sensors: self.n_sensors,
            });
        }
        self.actions.validate()?;
        self.outcomes.validate()
    }
}

fn check_unit(what: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { what, value })
    }
}
