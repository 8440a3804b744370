use gridsearch_core::{Classification, Grid};

use crate::Algorithm;
use crate::traits::{StepOutcome, Strategy};

/// Uniform-cost search over a working set of every open cell.
///
/// The working set starts with all non-wall cells in row-major order, START
/// at distance 0 and everything else at +∞. Each step removes the first
/// member with the smallest distance (a linear scan, so ties go to the
/// earliest cell in row-major order) and relaxes its neighbours.
#[derive(Debug, Default)]
pub struct Dijkstra {
    unvisited: Vec<usize>,
    /// Members of `unvisited` with a finite distance.
    reached: usize,
    nbuf: Vec<usize>,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in `unvisited` of the first member with minimum distance.
    fn min_position(&self, grid: &Grid) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &i) in self.unvisited.iter().enumerate() {
            let d = grid.cell(i).dist;
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((pos, d)),
            }
        }
        best.map(|(pos, _)| pos)
    }
}

impl Strategy for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn seed(&mut self, grid: &mut Grid) {
        self.unvisited.clear();
        for i in 0..grid.cell_count() {
            let cell = grid.cell_mut(i);
            cell.clear_metadata();
            if !cell.is_wall() {
                self.unvisited.push(i);
            }
        }
        grid.cell_mut(grid.start()).dist = 0.0;
        self.reached = 1;
    }

    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        let Some(pos) = self.min_position(grid) else {
            return StepOutcome::Exhausted;
        };
        let current = self.unvisited[pos];
        let current_dist = grid.cell(current).dist;
        if current_dist.is_infinite() {
            // Only cells cut off from START remain.
            return StepOutcome::Exhausted;
        }
        self.unvisited.remove(pos);
        self.reached -= 1;

        if current == grid.end() {
            return StepOutcome::FoundAt(current);
        }

        self.nbuf.clear();
        grid.neighbors(current, &mut self.nbuf);
        for &ni in &self.nbuf {
            let alt = current_dist + 1.0;
            let n = grid.cell_mut(ni);
            if alt < n.dist {
                if n.dist.is_infinite() {
                    self.reached += 1;
                }
                n.dist = alt;
                n.parent = Some(current);
                grid.mark(ni, Classification::Frontier);
            }
        }
        grid.mark(current, Classification::Visited);

        if self.reached == 0 {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Running
        }
    }

    /// Working-set members already reached from START; the unreachable rest
    /// of the working set is not counted.
    fn frontier_len(&self) -> usize {
        self.reached
    }
}
