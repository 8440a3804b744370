//! The search state machine.

use rand::RngExt;

use gridsearch_core::{Classification, ConfigError, Grid, Point, WallGen};

use crate::reconstruct::reconstruct;
use crate::state::{EngineState, SearchStats};
use crate::traits::{StepOutcome, Strategy};
use crate::{Algorithm, EngineConfig};

/// Where the wall layout comes from on every reset.
#[derive(Debug)]
enum Layout {
    /// Random walls from a seeded generator.
    Random(WallGen),
    /// A fixed layout, restored verbatim.
    Fixed(Grid),
}

/// A resumable pathfinding search over a [`Grid`].
///
/// The engine owns the grid and the active [`Strategy`]. Every public
/// operation checks the current [`EngineState`]; calls that are not valid in
/// that state are ignored and report so through their return value.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid,
    layout: Layout,
    wall_seed: Option<u64>,
    algorithm: Algorithm,
    strategy: Box<dyn Strategy>,
    state: EngineState,
    stats: SearchStats,
    path: Vec<usize>,
}

fn fresh_seed() -> u64 {
    rand::rng().random()
}

impl Engine {
    /// Build an engine from `config` and generate the first wall layout.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols)?;
        let seed = config.seed.unwrap_or_else(fresh_seed);
        let walls = WallGen::seeded(seed, config.wall_probability)?;
        let mut engine = Self {
            algorithm: config.algorithm,
            strategy: config.algorithm.strategy(),
            config,
            grid,
            layout: Layout::Random(walls),
            wall_seed: None,
            state: EngineState::Idle,
            stats: SearchStats::default(),
            path: Vec::new(),
        };
        engine.regenerate();
        Ok(engine)
    }

    /// Build an engine around a prepared layout. Resets restore this layout
    /// instead of generating random walls.
    pub fn with_grid(mut grid: Grid, algorithm: Algorithm) -> Self {
        grid.clear_search();
        let config = EngineConfig::default()
            .with_size(grid.rows(), grid.cols())
            .with_wall_probability(0.0)
            .with_algorithm(algorithm);
        Self {
            config,
            layout: Layout::Fixed(grid.clone()),
            grid,
            wall_seed: None,
            algorithm,
            strategy: algorithm.strategy(),
            state: EngineState::Idle,
            stats: SearchStats::default(),
            path: Vec::new(),
        }
    }

    fn regenerate(&mut self) {
        match &mut self.layout {
            Layout::Random(walls) => {
                let seed = self.config.seed.unwrap_or_else(fresh_seed);
                walls.reseed(seed);
                let placed = walls.generate(&mut self.grid);
                self.wall_seed = Some(seed);
                log::debug!("reset: {placed} walls from seed {seed}");
            }
            Layout::Fixed(layout) => {
                self.grid.clone_from(layout);
                log::debug!("reset: fixed layout restored");
            }
        }
    }

    fn discard_search(&mut self) {
        self.strategy = self.algorithm.strategy();
        self.state = EngineState::Idle;
        self.stats = SearchStats::default();
        self.path.clear();
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Return to Idle with a freshly generated wall layout. Always allowed.
    pub fn reset(&mut self) {
        self.discard_search();
        self.regenerate();
    }

    /// Return to Idle keeping the current walls, erasing every trace of the
    /// last search. Refused while Running.
    pub fn clear_search(&mut self) -> bool {
        if self.state.is_running() {
            log::debug!("clear refused while running");
            return false;
        }
        self.discard_search();
        self.grid.clear_search();
        true
    }

    /// Seed the frontier of the selected algorithm and move to Running.
    /// Only valid from Idle.
    pub fn start(&mut self) -> bool {
        if self.state != EngineState::Idle {
            log::debug!("start ignored in state {}", self.state);
            return false;
        }
        self.grid.clear_search();
        self.strategy.seed(&mut self.grid);
        self.stats = SearchStats {
            peak_frontier: self.strategy.frontier_len(),
            ..SearchStats::default()
        };
        self.state = EngineState::Running;
        log::debug!("{} started", self.algorithm);
        true
    }

    /// Perform one unit of work. Returns the state afterwards; outside
    /// Running nothing happens.
    pub fn step(&mut self) -> EngineState {
        if !self.state.is_running() {
            return self.state;
        }
        self.stats.steps += 1;
        let outcome = self.strategy.step(&mut self.grid);
        let frontier = self.strategy.frontier_len();
        self.stats.peak_frontier = self.stats.peak_frontier.max(frontier);
        log::trace!(
            "{} step {}: {outcome:?}, frontier {frontier}",
            self.algorithm,
            self.stats.steps
        );

        match outcome {
            StepOutcome::Running => {}
            StepOutcome::FoundAt(goal) => {
                self.path = reconstruct(&mut self.grid, goal);
                self.stats.path_len = Some(self.path.len() - 1);
                self.state = EngineState::FinishedFound;
                log::debug!(
                    "{} found a path of length {} in {} steps",
                    self.algorithm,
                    self.path.len() - 1,
                    self.stats.steps
                );
            }
            StepOutcome::Exhausted => {
                self.state = EngineState::FinishedNoPath;
                log::debug!("{} found no path in {} steps", self.algorithm, self.stats.steps);
            }
        }
        self.state
    }

    /// Start if Idle, then step until the search finishes.
    pub fn run(&mut self) -> EngineState {
        self.start();
        while self.state.is_running() {
            self.step();
        }
        self.state
    }

    /// Select another algorithm and reset. Refused while Running.
    pub fn change_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.state.is_running() {
            log::debug!("algorithm change to {algorithm} refused while running");
            return false;
        }
        log::debug!("algorithm {} -> {algorithm}", self.algorithm);
        self.algorithm = algorithm;
        self.config.algorithm = algorithm;
        self.reset();
        true
    }

    /// Flip a wall at `(row, col)`. Refused while Running, on START or END,
    /// and outside the grid; a refused edit leaves the engine untouched.
    /// After a finished search the search is cleared first so the edit
    /// applies to a clean grid.
    pub fn toggle_wall(&mut self, row: i32, col: i32) -> bool {
        if self.state.is_running() {
            log::debug!("wall edit at ({row}, {col}) refused while running");
            return false;
        }
        match self.grid.classification(row, col) {
            None | Some(Classification::Start | Classification::End) => return false,
            Some(_) => {}
        }
        if self.state.is_finished() {
            self.clear_search();
        }
        self.grid.toggle_wall(row, col)
    }

    /// Use `seed` (or fresh seeds, with `None`) for subsequent resets.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn found_path(&self) -> bool {
        self.state == EngineState::FinishedFound
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Size of the active frontier; zero while Idle.
    pub fn frontier_len(&self) -> usize {
        self.strategy.frontier_len()
    }

    /// Positions of the found path from START to END, empty unless the last
    /// search succeeded.
    pub fn path(&self) -> Vec<Point> {
        self.path.iter().map(|&i| self.grid.point(i)).collect()
    }

    /// The seed behind the current random layout, `None` for fixed layouts.
    #[inline]
    pub fn wall_seed(&self) -> Option<u64> {
        self.wall_seed
    }

    /// Classification at `(row, col)`, `None` out of bounds.
    #[inline]
    pub fn classification(&self, row: i32, col: i32) -> Option<Classification> {
        self.grid.classification(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(rows: i32, cols: i32, algorithm: Algorithm) -> Engine {
        Engine::with_grid(Grid::new(rows, cols).unwrap(), algorithm)
    }

    #[test]
    fn new_generates_a_seeded_layout() {
        let cfg = EngineConfig::default().with_seed(17);
        let a = Engine::new(cfg.clone()).unwrap();
        let b = Engine::new(cfg).unwrap();
        assert_eq!(a.wall_seed(), Some(17));
        assert_eq!(a.grid().to_ascii(), b.grid().to_ascii());
        assert_eq!(a.state(), EngineState::Idle);
        assert_eq!((a.grid().rows(), a.grid().cols()), (20, 30));
    }

    #[test]
    fn new_rejects_bad_config() {
        let cfg = EngineConfig::default().with_size(-1, 3);
        assert!(matches!(Engine::new(cfg), Err(ConfigError::EmptyGrid { .. })));
        let cfg = EngineConfig::default().with_wall_probability(2.0);
        assert_eq!(Engine::new(cfg).unwrap_err(), ConfigError::WallProbability(2.0));
    }

    #[test]
    fn unseeded_resets_record_their_seed() {
        let mut e = Engine::new(EngineConfig::default()).unwrap();
        e.reset();
        let seed = e.wall_seed().unwrap();
        let layout = e.grid().to_ascii();

        let replay = Engine::new(EngineConfig::default().with_seed(seed)).unwrap();
        assert_eq!(replay.grid().to_ascii(), layout);
    }

    #[test]
    fn bfs_on_open_3x3() {
        let mut e = open(3, 3, Algorithm::Bfs);
        assert!(e.start());
        assert!(e.is_running());
        let mut steps = 0;
        while e.is_running() {
            e.step();
            steps += 1;
        }
        assert!(e.found_path());
        assert!(steps <= 9);
        assert_eq!(e.stats().steps, steps);
        assert_eq!(e.stats().path_len, Some(4));
        assert_eq!(e.path().len(), 5);
        assert_eq!(e.grid().count(Classification::Path), 3);
        assert_eq!(e.classification(0, 0), Some(Classification::Start));
        assert_eq!(e.classification(2, 2), Some(Classification::End));
    }

    #[test]
    fn single_cell_grid() {
        let mut e = open(1, 1, Algorithm::Bfs);
        assert!(e.start());
        assert_eq!(e.step(), EngineState::FinishedFound);
        assert_eq!(e.grid().count(Classification::Path), 0);
        assert_eq!(e.stats().path_len, Some(0));
        assert_eq!(e.path(), vec![Point::new(0, 0)]);
    }

    #[test]
    fn illegal_transitions_are_ignored() {
        let mut e = open(4, 4, Algorithm::Dfs);
        // step while Idle
        assert_eq!(e.step(), EngineState::Idle);
        assert_eq!(e.stats().steps, 0);

        assert!(e.start());
        assert!(!e.start());
        assert!(!e.change_algorithm(Algorithm::Astar));
        assert_eq!(e.algorithm(), Algorithm::Dfs);
        assert!(!e.toggle_wall(1, 1));
        assert!(!e.clear_search());

        e.run();
        assert!(e.is_finished());
        let steps = e.stats().steps;
        assert_eq!(e.step(), EngineState::FinishedFound);
        assert_eq!(e.stats().steps, steps);
        assert!(!e.start());
    }

    #[test]
    fn reset_is_always_allowed() {
        let mut e = Engine::new(EngineConfig::default().with_seed(3)).unwrap();
        let layout = e.grid().to_ascii();
        e.start();
        e.step();
        e.step();
        e.reset();
        assert_eq!(e.state(), EngineState::Idle);
        assert_eq!(e.frontier_len(), 0);
        assert_eq!(e.stats(), SearchStats::default());
        assert_eq!(e.grid().to_ascii(), layout);
        e.reset();
        assert_eq!(e.grid().to_ascii(), layout);
    }

    #[test]
    fn change_algorithm_resets() {
        let mut e = open(3, 3, Algorithm::Bfs);
        e.toggle_wall(1, 1);
        e.run();
        assert!(e.change_algorithm(Algorithm::Dijkstra));
        assert_eq!(e.algorithm(), Algorithm::Dijkstra);
        assert_eq!(e.config().algorithm, Algorithm::Dijkstra);
        assert_eq!(e.state(), EngineState::Idle);
        // The fixed layout comes back without the edit.
        assert_eq!(e.grid().to_ascii(), "S..\n...\n..E\n");
    }

    #[test]
    fn clear_search_keeps_walls() {
        let mut e = open(3, 3, Algorithm::Bfs);
        assert!(e.toggle_wall(0, 1));
        e.run();
        assert!(e.found_path());
        assert!(e.clear_search());
        assert_eq!(e.state(), EngineState::Idle);
        assert!(e.path().is_empty());
        assert_eq!(e.grid().to_ascii(), "S#.\n...\n..E\n");
    }

    #[test]
    fn toggling_after_finish_clears_the_search() {
        let mut e = open(3, 3, Algorithm::Bfs);
        e.run();
        assert!(e.toggle_wall(1, 1));
        assert_eq!(e.state(), EngineState::Idle);
        assert_eq!(e.grid().to_ascii(), "S..\n.#.\n..E\n");
        assert!(!e.toggle_wall(0, 0));
        assert!(!e.toggle_wall(5, 5));
    }

    #[test]
    fn refused_toggle_keeps_a_finished_search() {
        let mut e = open(3, 3, Algorithm::Bfs);
        e.run();
        let before = e.grid().to_ascii();
        assert_eq!(e.grid().count(Classification::Path), 3);

        assert!(!e.toggle_wall(0, 0));
        assert!(!e.toggle_wall(2, 2));
        assert!(!e.toggle_wall(-1, 4));
        assert_eq!(e.state(), EngineState::FinishedFound);
        assert_eq!(e.grid().count(Classification::Path), 3);
        assert_eq!(e.grid().to_ascii(), before);
        assert_eq!(e.stats().path_len, Some(4));
    }

    #[test]
    fn wall_column_has_no_path() {
        for algorithm in Algorithm::ALL {
            let grid = Grid::from_ascii(
                "\
                .#..\n\
                .#..\n\
                .#..\n",
            )
            .unwrap();
            let mut e = Engine::with_grid(grid, algorithm);
            assert_eq!(e.run(), EngineState::FinishedNoPath, "{algorithm}");
            assert_eq!(e.frontier_len(), 0);
            assert_eq!(e.grid().count(Classification::Path), 0);
            assert_eq!(e.stats().path_len, None);
        }
    }

    #[test]
    fn stats_track_peak_frontier() {
        let mut e = open(5, 5, Algorithm::Bfs);
        e.start();
        assert_eq!(e.stats().peak_frontier, 1);
        e.run();
        assert!(e.stats().peak_frontier >= 2);
        assert_eq!(e.stats().path_len, Some(8));
    }

    #[test]
    fn set_seed_applies_on_reset() {
        let mut e = Engine::new(EngineConfig::default().with_seed(1)).unwrap();
        e.set_seed(Some(2));
        e.reset();
        assert_eq!(e.wall_seed(), Some(2));
        let other = Engine::new(EngineConfig::default().with_seed(2)).unwrap();
        assert_eq!(e.grid().to_ascii(), other.grid().to_ascii());
    }
}
