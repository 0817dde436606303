//! Planner hyperparameters.

// Action generation
pub const ACTIVITY_LEVEL_MEAN: f64 = 1.0;
pub const ACTIVITY_LEVEL_STDEV: f64 = 3.0;
pub const ACTIONS_PER_ACTUATOR: usize = 2; // random candidates = n_actuators * this
pub const ACTION_NUM_KEEP: usize = 4;
pub const PLAN_DECAY: f64 = 0.9; // Penalizes longer plans
pub const CURIOSITY_UTILITY: f64 = 0.01; // Floor for actions with no plausible outcomes

// Outcome generation
pub const OUTCOME_NUM_GENERATE: usize = 100;
pub const OUTCOME_NUM_KEEP: usize = 3;
pub const OUTCOME_PROB_THRESHOLD: f64 = 0.05;
pub const RECURSION_THRESHOLD: f64 = 0.5;

// Lookahead
pub const RECURSION_DEPTH: u32 = 2;

// Confidence interval
pub const Z_95: f64 = 1.96;

// Games
pub const MAZE_TURN_LIMIT: u32 = 2_000;
pub const STORE_SIZE_WARNING: usize = 1_000_000;
