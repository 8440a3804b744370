use std::fmt;

/// Lifecycle of a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// No frontier seeded; walls may be edited.
    #[default]
    Idle,
    /// Frontier seeded, goal not reached yet.
    Running,
    /// Goal reached and path reconstructed.
    FinishedFound,
    /// Frontier exhausted without reaching the goal.
    FinishedNoPath,
}

impl EngineState {
    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::FinishedFound | Self::FinishedNoPath)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::FinishedFound => "path found",
            Self::FinishedNoPath => "no path",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counters for the current (or last) search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// `step` calls that did work.
    pub steps: usize,
    /// Largest frontier observed, seed included.
    pub peak_frontier: usize,
    /// Moves on the found path; `None` until a path is found.
    pub path_len: Option<usize>,
}
