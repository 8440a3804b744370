use std::fmt;

use gridsearch_core::Grid;

use crate::Algorithm;

/// What a single [`Strategy::step`] achieved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One cell was expanded and the frontier still has work.
    Running,
    /// The goal was selected; carries its arena index.
    FoundAt(usize),
    /// The frontier ran dry (or only unreachable cells remain).
    Exhausted,
}

/// A search algorithm that can be advanced one unit of work at a time.
///
/// A strategy owns its frontier and nothing else; all per-cell state lives
/// in the [`Grid`]. Strategies reclassify cells only through
/// [`Grid::mark`], which keeps START and END intact.
pub trait Strategy: fmt::Debug {
    /// Which algorithm this is.
    fn algorithm(&self) -> Algorithm;

    /// Discard any previous frontier and seed a new one from START, using
    /// the grid's current wall layout.
    fn seed(&mut self, grid: &mut Grid);

    /// Perform exactly one unit of work: select one frontier cell and
    /// expand its (at most four) neighbours.
    fn step(&mut self, grid: &mut Grid) -> StepOutcome;

    /// Number of cells currently waiting to be expanded.
    fn frontier_len(&self) -> usize;
}
