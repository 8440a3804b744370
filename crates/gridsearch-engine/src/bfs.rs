use std::collections::VecDeque;

use gridsearch_core::{Classification, Grid};

use crate::Algorithm;
use crate::traits::{StepOutcome, Strategy};

/// Breadth-first search: FIFO frontier, level order.
///
/// Each cell is linked to its predecessor exactly once, when it is first
/// discovered, so the reconstructed path is a shortest one.
#[derive(Debug, Default)]
pub struct Bfs {
    queue: VecDeque<usize>,
    seen: Vec<bool>,
    nbuf: Vec<usize>,
}

impl Bfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for Bfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn seed(&mut self, grid: &mut Grid) {
        self.queue.clear();
        reset_seen(&mut self.seen, grid);
        self.queue.push_back(grid.start());
    }

    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        let Some(current) = self.queue.pop_front() else {
            return StepOutcome::Exhausted;
        };
        if current == grid.end() {
            return StepOutcome::FoundAt(current);
        }

        let queue = &mut self.queue;
        discover(grid, current, &mut self.seen, &mut self.nbuf, |ni| {
            queue.push_back(ni)
        });
        grid.mark(current, Classification::Visited);

        if self.queue.is_empty() {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Running
        }
    }

    fn frontier_len(&self) -> usize {
        self.queue.len()
    }
}

/// Size the discovery bitmap for `grid` and mark START as already found.
pub(crate) fn reset_seen(seen: &mut Vec<bool>, grid: &Grid) {
    seen.clear();
    seen.resize(grid.cell_count(), false);
    seen[grid.start()] = true;
}

/// Expansion shared by BFS and DFS: every EMPTY or END neighbour of
/// `current` that has not been discovered yet gets `current` as its
/// predecessor, is marked FRONTIER (END keeps its class) and is handed to
/// `push`.
pub(crate) fn discover(
    grid: &mut Grid,
    current: usize,
    seen: &mut [bool],
    nbuf: &mut Vec<usize>,
    mut push: impl FnMut(usize),
) {
    nbuf.clear();
    grid.neighbors(current, nbuf);

    for &ni in nbuf.iter() {
        if seen[ni] {
            continue;
        }
        if !matches!(grid.class(ni), Classification::Empty | Classification::End) {
            continue;
        }
        seen[ni] = true;
        grid.cell_mut(ni).parent = Some(current);
        grid.mark(ni, Classification::Frontier);
        push(ni);
    }
}
