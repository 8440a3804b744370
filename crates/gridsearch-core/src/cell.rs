//! The [`SearchCell`] type and its [`Classification`].

use crate::geom::Point;

/// The logical category of a cell. Drives both the strategies' decisions
/// and what a presentation layer draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Path,
    Visited,
    Frontier,
}

impl Classification {
    /// All classifications, in declaration order.
    pub const ALL: [Classification; 7] = [
        Self::Empty,
        Self::Wall,
        Self::Start,
        Self::End,
        Self::Path,
        Self::Visited,
        Self::Frontier,
    ];

    /// Whether a search may move through a cell of this kind.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// START and END are fixed for the lifetime of a layout.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Single-character symbol used by [`Grid::to_ascii`](crate::Grid::to_ascii).
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Path => '*',
            Self::Visited => 'v',
            Self::Frontier => 'f',
        }
    }

    /// Inverse of [`symbol`](Self::symbol).
    pub fn from_symbol(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == ch)
    }
}

/// Per-cell search metadata, stored in the grid arena.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchCell {
    pub pos: Point,
    pub class: Classification,
    /// Accumulated path cost from START (Dijkstra and A*).
    pub dist: f32,
    /// `dist` plus the heuristic estimate to END (A* only).
    pub score: f32,
    /// Arena index of the cell this one was reached from.
    pub parent: Option<usize>,
}

impl SearchCell {
    /// A fresh EMPTY cell at `pos` with no search metadata.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            class: Classification::Empty,
            dist: f32::INFINITY,
            score: f32::INFINITY,
            parent: None,
        }
    }

    /// Forget distance, score and predecessor. The classification is kept.
    #[inline]
    pub fn clear_metadata(&mut self) {
        self.dist = f32::INFINITY;
        self.score = f32::INFINITY;
        self.parent = None;
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.class == Classification::Wall
    }
}
