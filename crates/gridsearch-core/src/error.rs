//! Configuration errors.
//!
//! Runtime misuse of the engine (stepping while idle, editing walls while a
//! search runs, out-of-bounds queries) is not an error: those calls are
//! no-ops. The only fallible surface is building a grid or engine from
//! caller-supplied options.

use thiserror::Error;

/// Rejected configuration input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Rows and columns must both be positive.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },

    /// The wall probability is not a number in `[0, 1]`.
    #[error("wall probability must lie in [0, 1], got {0}")]
    WallProbability(f64),

    /// A wall layout whose rows differ in length.
    #[error("layout row {row} has {got} columns, expected {expected}")]
    RaggedLayout { row: i32, expected: i32, got: i32 },

    /// An algorithm name that none of the strategies answer to.
    #[error("unknown algorithm `{0}` (expected one of: bfs, dfs, dijkstra, astar)")]
    UnknownAlgorithm(String),
}
