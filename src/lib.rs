#![warn(missing_docs)]

//! # `lemin`
//!
//! A solver for the lem-in puzzle: move every unit ("ant") of a colony from its start room to its end room in as few turns as possible.
//! Begin by parsing map text with [`parse_colony`] or by declaring rooms and tunnels on a [`ColonyBuilder`].
//! Then call [`solve()`](crate::Colony::solve) on the resulting [`Colony`], yielding a [`Schedule`] which renders as the turn-by-turn moves.
//!
//! Tunnels have capacity one and every room but start and end holds at most one unit at a time.
//! Each turn, every unit may advance through at most one tunnel.
//!
//! # Internals
//! The colony is kept as an undirected [`petgraph`] graph map whose neighbor order is the order tunnels were declared in,
//! which makes every stage below deterministic for a given map text.
//!
//! 1. Every simple path from start to end is enumerated depth first and sorted by length, shortest first.
//! 2. Paths sharing a room other than start and end conflict. Every non-empty set of pairwise non-conflicting paths is a group;
//! groups are collected by backtracking over the conflict matrix.
//! 3. A group is dropped if a strictly larger group contains all of its paths.
//! 4. For each remaining group, units are handed out one by one to the path on which they would arrive soonest.
//! The group whose last unit arrives first wins.
//! 5. The chosen plan is played turn by turn. A path releases one unit per turn, so units on a path never share a room.
//!
//! Both searches are exhaustive and may explode on dense maps; see [`SolverConfig`] to bound them.

pub use builder::{BuilderInvalidReason, ColonyBuilder};
pub use colony::{Colony, SolveFailure};
pub use config::SolverConfig;
pub use group::PathGroup;
pub use parser::parse_colony;
pub use path::Path;
pub use room::{Coord, Marker, Room, RoomId};
pub use scheduler::Plan;
pub use simulator::{Move, Schedule, Turn, TurnDisplay, UnitId};

pub mod builder;
pub(crate) mod colony;
pub mod config;
pub(crate) mod group;
pub mod parser;
pub(crate) mod path;
pub(crate) mod room;
pub(crate) mod scheduler;
pub(crate) mod simulator;
#[cfg(feature = "wasm")]
pub mod wasm;
mod tests;
