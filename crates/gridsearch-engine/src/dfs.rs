use gridsearch_core::{Classification, Grid};

use crate::Algorithm;
use crate::bfs::{discover, reset_seen};
use crate::traits::{StepOutcome, Strategy};

/// Depth-first search: the BFS shell with a LIFO frontier.
///
/// Finds a path whenever one exists, with no guarantee on its length.
#[derive(Debug, Default)]
pub struct Dfs {
    stack: Vec<usize>,
    seen: Vec<bool>,
    nbuf: Vec<usize>,
}

impl Dfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for Dfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn seed(&mut self, grid: &mut Grid) {
        self.stack.clear();
        reset_seen(&mut self.seen, grid);
        self.stack.push(grid.start());
    }

    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        let Some(current) = self.stack.pop() else {
            return StepOutcome::Exhausted;
        };
        if current == grid.end() {
            return StepOutcome::FoundAt(current);
        }

        let stack = &mut self.stack;
        discover(grid, current, &mut self.seen, &mut self.nbuf, |ni| stack.push(ni));
        grid.mark(current, Classification::Visited);

        if self.stack.is_empty() {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Running
        }
    }

    fn frontier_len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_core::Point;

    #[test]
    fn last_discovered_is_expanded_first() {
        let mut g = Grid::new(3, 3).unwrap();
        let mut dfs = Dfs::new();
        dfs.seed(&mut g);
        dfs.step(&mut g);
        // START pushed (1,0) then (0,1); the stack pops (0,1) next.
        assert_eq!(dfs.frontier_len(), 2);
        dfs.step(&mut g);
        assert_eq!(g.classification(0, 1), Some(Classification::Visited));
        assert_eq!(g.classification(1, 0), Some(Classification::Frontier));
    }

    #[test]
    fn reaches_end_on_open_grid() {
        let mut g = Grid::new(4, 5).unwrap();
        let mut dfs = Dfs::new();
        dfs.seed(&mut g);
        let mut outcome = StepOutcome::Running;
        for _ in 0..g.cell_count() {
            outcome = dfs.step(&mut g);
            if outcome != StepOutcome::Running {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::FoundAt(g.end()));
        assert_eq!(g.classification(3, 4), Some(Classification::End));
        assert!(g.cell(g.end()).parent.is_some());
    }

    #[test]
    fn exhausts_when_end_is_sealed() {
        let mut g = Grid::from_ascii(
            "\
            ....\n\
            ...#\n\
            ..#.\n",
        )
        .unwrap();
        let mut dfs = Dfs::new();
        dfs.seed(&mut g);
        let mut steps = 0;
        let outcome = loop {
            steps += 1;
            match dfs.step(&mut g) {
                StepOutcome::Running => {}
                done => break done,
            }
        };
        assert_eq!(outcome, StepOutcome::Exhausted);
        // Every open cell except END was expanded exactly once.
        assert_eq!(steps, 9);
        assert_eq!(g.count(Classification::Visited), 8);
        assert_eq!(dfs.frontier_len(), 0);
        assert_eq!(g.at(Point::new(2, 3)).unwrap().parent, None);
    }
}
