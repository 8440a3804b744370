//! Resumable, single-step pathfinding on an obstacle grid.
//!
//! The [`Engine`] hosts one of four interchangeable strategies and advances
//! it one unit of work per [`Engine::step`] call, so a caller can observe
//! the grid's cell classification after every step:
//!
//! - **BFS** ([`Bfs`]): FIFO frontier, shortest path in unit-cost grids
//! - **DFS** ([`Dfs`]): LIFO frontier, reachability only
//! - **Dijkstra** ([`Dijkstra`]): working set scanned for minimum distance
//! - **A\*** ([`Astar`]): open set scanned for minimum `distance + manhattan`
//!
//! # State machine
//!
//! | State | `start` | `step` | `reset` | `change_algorithm` |
//! |---|---|---|---|---|
//! | `Idle` | → `Running` | no-op | → `Idle` | → `Idle` |
//! | `Running` | no-op | one unit of work | → `Idle` | refused |
//! | `FinishedFound` / `FinishedNoPath` | no-op | no-op | → `Idle` | → `Idle` |

mod algorithm;
mod astar;
mod bfs;
mod config;
mod dfs;
mod dijkstra;
mod engine;
mod reconstruct;
mod state;
mod traits;

pub use algorithm::Algorithm;
pub use astar::Astar;
pub use bfs::Bfs;
pub use config::{DEFAULT_COLS, DEFAULT_ROWS, EngineConfig};
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use engine::Engine;
pub use reconstruct::reconstruct;
pub use state::{EngineState, SearchStats};
pub use traits::{StepOutcome, Strategy};

pub use gridsearch_core::{
    Classification, ConfigError, DEFAULT_WALL_PROBABILITY, Grid, Point, SearchCell,
};
