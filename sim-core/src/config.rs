use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable parameters for growth, sizing and relaxation.
///
/// The defaults give a slow trickle of one-pixel branches whose springs
/// lengthen by a tenth of a pixel per frame, capped at 250 nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Hard cap on the number of nodes.
    pub max_nodes: usize,
    /// Probability in `[0, 1]` that a branch is added on a given tick.
    pub growth_chance: f32,
    /// Amount added to every segment's desired length per tick.
    pub growth_rate: f32,
    /// Distance of a new child from its parent, and of the seed pair.
    pub initial_branch_length: f32,
    /// Radius = average incident desired length times this factor.
    pub node_size_multiplier: f32,
    /// Step size of the circle repulsion correction, in `(0, 1]`.
    pub repulsion_force: f32,
    /// Step size of the spring correction, in `(0, 1]`.
    pub attraction_force: f32,
    /// Relaxation sweeps per tick.
    pub physics_iterations: usize,
    /// Lower bound for node radii after sizing.
    pub min_radius: f32,
    /// Radius given to freshly created nodes until the next sizing pass.
    pub initial_radius: f32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            max_nodes: 250,
            growth_chance: 0.025,
            growth_rate: 0.1,
            initial_branch_length: 1.0,
            node_size_multiplier: 1.5,
            repulsion_force: 0.6,
            attraction_force: 0.1,
            physics_iterations: 4,
            min_radius: 2.0,
            initial_radius: 5.0,
        }
    }
}

fn check(
    field: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), ConfigError> {
    // `ok` is false for NaN as well, since every range test below is a comparison.
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

impl GrowthConfig {
    /// Validates every parameter range.
    ///
    /// ### Returns
    /// - `Ok(())` if the configuration can drive a simulation.
    /// - The first [`ConfigError`] found otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nodes < 2 {
            return Err(ConfigError::NodeBudgetTooSmall(self.max_nodes));
        }
        if self.physics_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        check(
            "growth_chance",
            self.growth_chance,
            (0.0..=1.0).contains(&self.growth_chance),
            "in [0, 1]",
        )?;
        check(
            "growth_rate",
            self.growth_rate,
            self.growth_rate >= 0.0 && self.growth_rate.is_finite(),
            "finite and >= 0",
        )?;
        check(
            "initial_branch_length",
            self.initial_branch_length,
            self.initial_branch_length > 0.0 && self.initial_branch_length.is_finite(),
            "finite and > 0",
        )?;
        check(
            "node_size_multiplier",
            self.node_size_multiplier,
            self.node_size_multiplier > 0.0 && self.node_size_multiplier.is_finite(),
            "finite and > 0",
        )?;
        check(
            "repulsion_force",
            self.repulsion_force,
            self.repulsion_force > 0.0 && self.repulsion_force <= 1.0,
            "in (0, 1]",
        )?;
        check(
            "attraction_force",
            self.attraction_force,
            self.attraction_force > 0.0 && self.attraction_force <= 1.0,
            "in (0, 1]",
        )?;
        check(
            "min_radius",
            self.min_radius,
            self.min_radius > 0.0 && self.min_radius.is_finite(),
            "finite and > 0",
        )?;
        check(
            "initial_radius",
            self.initial_radius,
            self.initial_radius > 0.0 && self.initial_radius.is_finite(),
            "finite and > 0",
        )?;
        Ok(())
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// Missing fields take their [`Default`] values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
