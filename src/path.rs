use itertools::Itertools;
use petgraph::algo::all_simple_paths;
use tracing::{debug, trace};

use crate::colony::{Colony, SolveFailure};
use crate::config::SolverConfig;
use crate::room::RoomId;

/// A simple path from the start room to the end room, both included.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path(pub(crate) Vec<RoomId>);

impl Path {
    /// Every room visited, start and end included.
    pub fn rooms(&self) -> &[RoomId] {
        &self.0
    }

    /// Number of tunnels crossed, i.e. the turns a lone unit needs to travel this path.
    pub fn hops(&self) -> usize {
        self.0.len() - 1
    }

    /// Rooms strictly between start and end. Only these may never be shared between paths.
    pub fn interior(&self) -> &[RoomId] {
        &self.0[1..self.0.len() - 1]
    }

    /// The rooms a unit enters on its way, i.e. everything but the start room.
    pub fn route(&self) -> &[RoomId] {
        &self.0[1..]
    }
}

/// Find every simple path from start to end, shortest first.
///
/// The depth-first search visits neighbors in tunnel declaration order, and paths of equal length keep their discovery order,
/// so the result is fully determined by the map text.
pub(crate) fn enumerate_paths(
    colony: &Colony,
    config: &SolverConfig,
) -> Result<Vec<Path>, SolveFailure> {
    // all_simple_paths bounds the rooms strictly between the two ends
    let max_interior = config.max_path_rooms.map(|rooms| rooms.saturating_sub(2));
    let mut found = all_simple_paths::<Vec<RoomId>, _>(
        &colony.graph,
        colony.start,
        colony.end,
        0,
        max_interior,
    )
    .map(Path);

    let mut paths = match config.max_paths {
        Some(limit) => {
            let paths = found.by_ref().take(limit.saturating_add(1)).collect_vec();
            if paths.len() > limit {
                return Err(SolveFailure::PathLimitExceeded { limit });
            }
            paths
        }
        None => found.collect_vec(),
    };

    if paths.is_empty() {
        return Err(SolveFailure::NoPathFound);
    }

    // stable, so discovery order breaks ties
    paths.sort_by_key(|path| path.0.len());

    debug!(paths = paths.len(), shortest = paths[0].hops(), "enumerated simple paths");
    for (index, path) in paths.iter().enumerate() {
        trace!(index, rooms = ?path.rooms(), "path");
    }

    Ok(paths)
}
