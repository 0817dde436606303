//! Error types for configuration and planning.

use thiserror::Error;

/// Rejected planner configuration. Raised once, at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("vector length for {what} must be positive")]
    ZeroLength { what: &'static str },

    #[error("utility index {index} out of range for {n_sensors} sensors")]
    UtilityIndexOutOfRange { index: usize, n_sensors: usize },

    #[error("{what} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { what: &'static str, value: f64 },

    #[error("decay factor must lie in (0, 1], got {0}")]
    InvalidDecay(f64),

    #[error("activity level {what} must be finite and non-negative, got {value}")]
    InvalidActivity { what: &'static str, value: f64 },

    #[error("{what} must keep at least one candidate")]
    ZeroKeep { what: &'static str },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Failures raised while planning or feeding the organism.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// A search tried to recurse past its depth budget. This is an internal
    /// invariant violation, never a recoverable condition.
    #[error("recursion budget exceeded: cannot descend below depth 0")]
    RecursionBudgetExceeded,

    #[error("no situation observed yet; call handle_sensor_input first")]
    NoSituation,

    #[error("{what} vector has length {got}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
