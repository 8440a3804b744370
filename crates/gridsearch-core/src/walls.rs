//! Random wall generation.
//!
//! Every cell except START and END independently becomes a wall with
//! probability `p`. Given the same seed the layout is always the same.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::cell::Classification;
use crate::error::ConfigError;
use crate::grid::Grid;

/// Wall density used when none is configured.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Check that `p` is usable as a wall probability.
pub fn validate_probability(p: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(ConfigError::WallProbability(p))
    }
}

impl Grid {
    /// Replace the layout with fresh random walls: every cell becomes WALL
    /// with probability `p`, otherwise EMPTY. START and END are restored,
    /// all search metadata is cleared.
    ///
    /// Returns the number of walls placed.
    pub fn generate_walls<R: Rng + ?Sized>(&mut self, p: f64, rng: &mut R) -> usize {
        self.clear();
        let (start, end) = (self.start(), self.end());
        let mut walls = 0;
        for i in 0..self.cell_count() {
            // Draw for the endpoints too, so that the layout of the inner
            // cells does not depend on where START and END sit.
            let r: f64 = rng.random();
            if i == start || i == end {
                continue;
            }
            if r < p {
                self.cell_mut(i).class = Classification::Wall;
                walls += 1;
            }
        }
        log::trace!(
            "generated {walls} walls on a {}x{} grid (p = {p})",
            self.rows(),
            self.cols()
        );
        walls
    }
}

/// Seeded wall generator. Owns the RNG so that a sequence of layouts can be
/// replayed from one seed.
#[derive(Debug)]
pub struct WallGen {
    rng: StdRng,
    probability: f64,
}

impl WallGen {
    /// Create a generator with the given seed and wall probability.
    pub fn seeded(seed: u64, probability: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            probability: validate_probability(probability)?,
        })
    }

    /// The configured wall probability.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Restart the random sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Fill `grid` with the next layout. Returns the number of walls placed.
    pub fn generate(&mut self, grid: &mut Grid) -> usize {
        grid.generate_walls(self.probability, &mut self.rng)
    }
}
