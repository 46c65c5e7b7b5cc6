//! Limits on the exhaustive search.

/// Bounds for the path and group search. Every limit defaults to `None`, i.e. unbounded.
///
/// Both searches are exponential in the worst case; callers facing untrusted maps should set limits.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SolverConfig {
    /// Fail with [`PathLimitExceeded`](crate::SolveFailure::PathLimitExceeded) once more than this many paths are found.
    pub max_paths: Option<usize>,
    /// Skip paths visiting more rooms than this, start and end included.
    /// Values below 2 still admit a direct start to end tunnel.
    pub max_path_rooms: Option<usize>,
    /// Fail with [`GroupLimitExceeded`](crate::SolveFailure::GroupLimitExceeded) once more than this many disjoint groups are found.
    pub max_groups: Option<usize>,
}

impl SolverConfig {
    /// Set [`Self::max_paths`].
    pub fn with_max_paths(mut self, limit: usize) -> Self {
        self.max_paths = Some(limit);
        self
    }

    /// Set [`Self::max_path_rooms`].
    pub fn with_max_path_rooms(mut self, limit: usize) -> Self {
        self.max_path_rooms = Some(limit);
        self
    }

    /// Set [`Self::max_groups`].
    pub fn with_max_groups(mut self, limit: usize) -> Self {
        self.max_groups = Some(limit);
        self
    }
}
