use std::fmt;
use std::str::FromStr;

use gridsearch_core::ConfigError;

use crate::traits::Strategy;
use crate::{Astar, Bfs, Dfs, Dijkstra};

/// The selectable search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
}

impl Algorithm {
    /// All algorithms in menu order.
    pub const ALL: [Algorithm; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::Astar];

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Dijkstra => "Dijkstra",
            Self::Astar => "A*",
        }
    }

    /// The next algorithm in menu order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::Dijkstra,
            Self::Dijkstra => Self::Astar,
            Self::Astar => Self::Bfs,
        }
    }

    /// Whether the algorithm always reports a shortest path.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }

    /// Build a fresh, unseeded strategy for this algorithm.
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Self::Bfs => Box::new(Bfs::new()),
            Self::Dfs => Box::new(Dfs::new()),
            Self::Dijkstra => Box::new(Dijkstra::new()),
            Self::Astar => Box::new(Astar::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "dijkstra" | "ucs" | "uniform-cost" => Ok(Self::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Self::Astar),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}
