use std::collections::HashSet;

use itertools::Itertools;
use ndarray::Array2;
use tracing::trace;

use crate::colony::SolveFailure;
use crate::config::SolverConfig;
use crate::path::Path;

/// Paths which share no room except start and end, as ascending indices into the sorted path list.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PathGroup(pub(crate) Vec<usize>);

impl PathGroup {
    /// Indices of the member paths, ascending.
    pub fn paths(&self) -> &[usize] {
        &self.0
    }

    /// Number of paths in this group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for groups produced by the solver.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every path of `self` is also part of `other`.
    fn is_subset_of(&self, other: &PathGroup) -> bool {
        // both sides are ascending
        self.0.iter().all(|path| other.0.binary_search(path).is_ok())
    }
}

/// `conflicts[[a, b]]` holds if paths `a` and `b` share an interior room.
///
/// Paths are nodes of a conflict graph, disjoint groups are its independent sets.
pub(crate) fn conflict_matrix(paths: &[Path]) -> Array2<bool> {
    let interiors = paths
        .iter()
        .map(|path| path.interior().iter().copied().collect::<HashSet<_>>())
        .collect_vec();

    Array2::from_shape_fn((paths.len(), paths.len()), |(a, b)| {
        a != b && !interiors[a].is_disjoint(&interiors[b])
    })
}

struct GroupSearch<'a> {
    conflicts: &'a Array2<bool>,
    limit: Option<usize>,
    current: Vec<usize>,
    found: Vec<PathGroup>,
}

impl GroupSearch<'_> {
    fn extend_from(&mut self, first: usize) -> Result<(), SolveFailure> {
        if !self.current.is_empty() {
            if let Some(limit) = self.limit {
                if self.found.len() == limit {
                    return Err(SolveFailure::GroupLimitExceeded { limit });
                }
            }
            self.found.push(PathGroup(self.current.clone()));
        }

        for candidate in first..self.conflicts.nrows() {
            if self.current.iter().all(|chosen| !self.conflicts[[*chosen, candidate]]) {
                self.current.push(candidate);
                self.extend_from(candidate + 1)?;
                self.current.pop();
            }
        }

        Ok(())
    }
}

/// Enumerate every non-empty set of pairwise disjoint paths, singletons included.
///
/// Groups come out in backtracking order: a group is recorded before any group extending it,
/// and extensions by lower path indices come first.
pub(crate) fn build_groups(
    paths: &[Path],
    config: &SolverConfig,
) -> Result<Vec<PathGroup>, SolveFailure> {
    let conflicts = conflict_matrix(paths);
    let mut search = GroupSearch {
        conflicts: &conflicts,
        limit: config.max_groups,
        current: Vec::new(),
        found: Vec::new(),
    };
    search.extend_from(0)?;

    trace!(groups = search.found.len(), "built disjoint path groups");
    Ok(search.found)
}

/// Drop every group whose paths all appear in some strictly larger group. Survivors keep their order.
pub(crate) fn reduce_groups(groups: Vec<PathGroup>) -> Vec<PathGroup> {
    let maximal = groups
        .iter()
        .map(|group| {
            !groups
                .iter()
                .any(|other| other.len() > group.len() && group.is_subset_of(other))
        })
        .collect_vec();

    groups
        .into_iter()
        .zip(maximal)
        .filter_map(|(group, keep)| keep.then_some(group))
        .collect()
}
