use gridsearch_core::ConfigError;
use gridsearch_core::walls::{DEFAULT_WALL_PROBABILITY, validate_probability};

use crate::Algorithm;

/// Reference grid height.
pub const DEFAULT_ROWS: i32 = 20;
/// Reference grid width.
pub const DEFAULT_COLS: i32 = 30;

/// Options for building an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub rows: i32,
    pub cols: i32,
    /// Chance that any cell other than START and END becomes a wall.
    pub wall_probability: f64,
    pub algorithm: Algorithm,
    /// Fixed seed for wall generation. With a seed every reset rebuilds the
    /// same layout; without one each reset draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            algorithm: Algorithm::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, rows: i32, cols: i32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_wall_probability(mut self, p: f64) -> Self {
        self.wall_probability = p;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<Option<u64>>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Reject dimensions that are not positive and wall probabilities
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        validate_probability(self.wall_probability)?;
        Ok(())
    }
}
