use std::collections::HashMap;
use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use tracing::debug;

use crate::config::SolverConfig;
use crate::group::{build_groups, reduce_groups};
use crate::path::enumerate_paths;
use crate::room::{Room, RoomId};
use crate::scheduler::{select_plan, Plan};
use crate::simulator::{simulate, Schedule};

/// Reasons [`Colony::solve`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolveFailure {
    /// The end room cannot be reached from the start room.
    #[error("invalid data format, no path found")]
    NoPathFound,
    /// Path enumeration produced more paths than [`SolverConfig::max_paths`] allows.
    #[error("search aborted, more than {limit} paths between start and end")]
    PathLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// Group construction produced more groups than [`SolverConfig::max_groups`] allows.
    #[error("search aborted, more than {limit} disjoint path groups")]
    GroupLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
}

/// A validated colony: rooms, the tunnels between them and the number of units to move.
///
/// [`Colony`]s are built with a [`ColonyBuilder`](crate::builder::ColonyBuilder), or parsed from map text with [`parse_colony`](crate::parse_colony).
#[derive(Clone, Debug)]
pub struct Colony {
    pub(crate) graph: UnGraphMap<RoomId, ()>,
    pub(crate) rooms: Vec<Room>,
    pub(crate) names: HashMap<String, RoomId>,
    pub(crate) start: RoomId,
    pub(crate) end: RoomId,
    pub(crate) units: NonZero<usize>,
}

impl Colony {
    /// Look up a room by id. Panics if `id` belongs to another colony.
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Every room, indexed by [`RoomId`].
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Id of the room called `name`, if any.
    pub fn find_room(&self, name: &str) -> Option<RoomId> {
        self.names.get(name).copied()
    }

    /// The room every unit starts in.
    pub fn start(&self) -> RoomId {
        self.start
    }

    /// The room every unit must reach.
    pub fn end(&self) -> RoomId {
        self.end
    }

    /// Number of units to move, at least one.
    pub fn units(&self) -> usize {
        self.units.get()
    }

    /// Number of distinct tunnels.
    pub fn tunnel_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Rooms adjacent to `room`, in the order their tunnels were declared.
    pub fn neighbors(&self, room: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.graph.neighbors(room)
    }

    /// Choose the paths and the split of units between them, without simulating the moves.
    pub fn plan(&self, config: &SolverConfig) -> Result<Plan, SolveFailure> {
        let paths = enumerate_paths(self, config)?;
        let groups = build_groups(&paths, config)?;
        let candidates = groups.len();
        let groups = reduce_groups(groups);
        debug!(candidates, maximal = groups.len(), "reduced path groups");

        select_plan(&paths, &groups, self.units()).ok_or(SolveFailure::NoPathFound)
    }

    /// Solve this colony with the default, unbounded [`SolverConfig`].
    pub fn solve(&self) -> Result<Schedule<'_>, SolveFailure> {
        self.solve_with(&SolverConfig::default())
    }

    /// Solve this colony, returning the turn-by-turn [`Schedule`] which moves every unit to the end room.
    ///
    /// Fails with [`SolveFailure::NoPathFound`] if the end is unreachable, or with a limit failure if the search outgrows `config`.
    pub fn solve_with(&self, config: &SolverConfig) -> Result<Schedule<'_>, SolveFailure> {
        let plan = self.plan(config)?;
        Ok(simulate(self, plan))
    }
}
