use thiserror::Error;

/// A [`crate::config::GrowthConfig`] that cannot drive a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric parameter lies outside its allowed range.
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// `physics_iterations` was zero.
    #[error("physics_iterations must be >= 1")]
    ZeroIterations,

    /// `max_nodes` is too small to hold the two-node seed.
    #[error("max_nodes must be >= 2, got {0}")]
    NodeBudgetTooSmall(usize),

    /// The configuration text could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Errors surfaced by [`crate::simulation::Simulation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `step` was called before `initialize`.
    #[error("simulation has not been initialized")]
    Uninitialized,
}
