use gridsearch_core::{Classification, Grid, manhattan};

use crate::Algorithm;
use crate::traits::{StepOutcome, Strategy};

/// A* with the Manhattan heuristic, which is admissible and consistent for
/// 4-directional unit-cost moves, so the first time END is selected its
/// distance is optimal.
///
/// The open set is an insertion-ordered `Vec` scanned for the minimum
/// priority; ties go to the member that entered the open set first.
#[derive(Debug, Default)]
pub struct Astar {
    open: Vec<usize>,
    in_open: Vec<bool>,
    nbuf: Vec<usize>,
}

impl Astar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic estimate of the remaining cost from `idx` to END.
    fn estimate(grid: &Grid, idx: usize) -> f32 {
        manhattan(grid.point(idx), grid.point(grid.end())) as f32
    }

    /// Position in `open` of the first member with minimum priority.
    fn min_position(&self, grid: &Grid) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &i) in self.open.iter().enumerate() {
            let f = grid.cell(i).score;
            match best {
                Some((_, bf)) if f >= bf => {}
                _ => best = Some((pos, f)),
            }
        }
        best.map(|(pos, _)| pos)
    }
}

impl Strategy for Astar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Astar
    }

    fn seed(&mut self, grid: &mut Grid) {
        for i in 0..grid.cell_count() {
            grid.cell_mut(i).clear_metadata();
        }
        self.open.clear();
        self.in_open.clear();
        self.in_open.resize(grid.cell_count(), false);

        let start = grid.start();
        let h = Self::estimate(grid, start);
        let cell = grid.cell_mut(start);
        cell.dist = 0.0;
        cell.score = h;
        self.open.push(start);
        self.in_open[start] = true;
    }

    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        let Some(pos) = self.min_position(grid) else {
            return StepOutcome::Exhausted;
        };
        let current = self.open[pos];
        if current == grid.end() {
            return StepOutcome::FoundAt(current);
        }

        self.open.remove(pos);
        self.in_open[current] = false;
        grid.mark(current, Classification::Visited);

        let current_dist = grid.cell(current).dist;
        self.nbuf.clear();
        grid.neighbors(current, &mut self.nbuf);
        for &ni in &self.nbuf {
            let tentative = current_dist + 1.0;
            if tentative >= grid.cell(ni).dist {
                continue;
            }
            let h = Self::estimate(grid, ni);
            let n = grid.cell_mut(ni);
            n.parent = Some(current);
            n.dist = tentative;
            n.score = tentative + h;
            if !self.in_open[ni] {
                self.in_open[ni] = true;
                grid.mark(ni, Classification::Frontier);
                self.open.push(ni);
            }
        }

        if self.open.is_empty() {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Running
        }
    }

    fn frontier_len(&self) -> usize {
        self.open.len()
    }
}
