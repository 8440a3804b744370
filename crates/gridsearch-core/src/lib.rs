//! **gridsearch-core** is the data side of the step-wise grid search engine.
//!
//! This crate owns everything a search strategy reads and writes:
//! positions ([`Point`]), per-cell search metadata ([`SearchCell`]), the
//! flat cell arena ([`Grid`]) with its adjacency queries, and seeded wall
//! generation ([`WallGen`]).
//!
//! Strategies never hold references into the grid; they work with arena
//! indices, and predecessor links are stored the same way.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod walls;

pub use cell::{Classification, SearchCell};
pub use error::ConfigError;
pub use geom::{Point, manhattan};
pub use grid::Grid;
pub use walls::{DEFAULT_WALL_PROBABILITY, WallGen};
