//! Step by step construction of a [`Colony`].

use std::collections::HashMap;
use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::colony::Colony;
use crate::room::{Coord, Marker, Role, Room, RoomId};

/// Reasons a builder may become invalid while building.
///
/// The messages match what the command line tool prints after `ERROR: `.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A line fits none of the expected shapes, or the map is too short to describe a colony.
    #[error("invalid data format")]
    InvalidFormat,
    /// The unit count is missing, not a number, or not positive.
    #[error("invalid data format, invalid number of Ants")]
    InvalidUnitCount,
    /// No room was flagged as the start.
    #[error("invalid data format, no start room found")]
    MissingStart,
    /// No room was flagged as the end.
    #[error("invalid data format, no end room found")]
    MissingEnd,
    /// A second start room was declared.
    #[error("invalid data format, more than one start room found")]
    DuplicateStart,
    /// A second end room was declared.
    #[error("invalid data format, more than one end room found")]
    DuplicateEnd,
    /// A room line is malformed or the room name is reserved (see [`Room::is_valid_name`]).
    #[error("invalid data format, invalid room format")]
    InvalidRoom,
    /// Two rooms share a name.
    #[error("invalid data format, duplicate room name")]
    DuplicateRoom,
    /// A tunnel line is malformed or names a room which was never declared.
    #[error("invalid data format, invalid tunnel format")]
    InvalidTunnel,
}

impl BuilderInvalidReason {
    pub(crate) fn missing(marker: Marker) -> Self {
        match marker {
            Marker::Start => Self::MissingStart,
            Marker::End => Self::MissingEnd,
        }
    }

    pub(crate) fn duplicate(marker: Marker) -> Self {
        match marker {
            Marker::Start => Self::DuplicateStart,
            Marker::End => Self::DuplicateEnd,
        }
    }
}

/// Builds a [`Colony`] room by room and tunnel by tunnel.
///
/// The builder records the first problem it runs into; every call made after that does nothing, and [`Self::build`] reports the problem.
/// Builders can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct ColonyBuilder {
    units: usize,
    rooms: Vec<Room>,
    names: HashMap<String, RoomId>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    tunnels: Vec<UnorderedPair<RoomId>>,
    invalid_reason: Option<BuilderInvalidReason>,
}

impl ColonyBuilder {
    /// Start a colony which must move `units` units from start to end.
    ///
    /// The builder is invalid from the outset with [`InvalidUnitCount`](BuilderInvalidReason::InvalidUnitCount) if `units` is zero.
    pub fn with_units(units: usize) -> Self {
        Self {
            units,
            rooms: Default::default(),
            names: Default::default(),
            start: None,
            end: None,
            tunnels: Default::default(),
            invalid_reason: if units == 0 {
                Some(BuilderInvalidReason::InvalidUnitCount)
            } else {
                None
            },
        }
    }

    fn invalidate(&mut self, reason: BuilderInvalidReason) -> &mut Self {
        self.invalid_reason.get_or_insert(reason);
        self
    }

    fn push_room(&mut self, name: &str, location: (Coord, Coord), role: Role) -> &mut Self {
        if self.invalid_reason.is_some() {
            return self;
        }

        if !Room::is_valid_name(name) {
            return self.invalidate(BuilderInvalidReason::InvalidRoom);
        }

        if self.names.contains_key(name) {
            return self.invalidate(BuilderInvalidReason::DuplicateRoom);
        }

        let id = RoomId(self.rooms.len());
        match role {
            Role::Start if self.start.is_some() => {
                return self.invalidate(BuilderInvalidReason::DuplicateStart)
            }
            Role::End if self.end.is_some() => {
                return self.invalidate(BuilderInvalidReason::DuplicateEnd)
            }
            Role::Start => self.start = Some(id),
            Role::End => self.end = Some(id),
            Role::Plain => {}
        }

        self.names.insert(name.to_owned(), id);
        self.rooms.push(Room {
            name: name.to_owned(),
            location,
            role,
        });

        self
    }

    /// Declare an ordinary room.
    ///
    /// May cause the builder to enter an [`InvalidRoom`](BuilderInvalidReason::InvalidRoom) state if `name` is reserved,
    /// or a [`DuplicateRoom`](BuilderInvalidReason::DuplicateRoom) state if `name` was declared before.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_room(&mut self, name: &str, location: (Coord, Coord)) -> &mut Self {
        self.push_room(name, location, Role::Plain)
    }

    /// Declare the room every unit starts in. Same conditions as [`Self::add_room`], and additionally
    /// enters a [`DuplicateStart`](BuilderInvalidReason::DuplicateStart) state if a start room exists already.
    pub fn add_start(&mut self, name: &str, location: (Coord, Coord)) -> &mut Self {
        self.push_room(name, location, Role::Start)
    }

    /// Declare the room every unit must reach. Same conditions as [`Self::add_start`], with
    /// [`DuplicateEnd`](BuilderInvalidReason::DuplicateEnd) in place of its start counterpart.
    pub fn add_end(&mut self, name: &str, location: (Coord, Coord)) -> &mut Self {
        self.push_room(name, location, Role::End)
    }

    /// Declare a room flagged by `marker`, see [`Self::add_start`] and [`Self::add_end`].
    pub fn add_marked(
        &mut self,
        marker: Marker,
        name: &str,
        location: (Coord, Coord),
    ) -> &mut Self {
        self.push_room(name, location, Role::from(marker))
    }

    /// Connect two declared rooms. The order of `from` and `to` does not matter.
    ///
    /// May cause the builder to enter an [`InvalidTunnel`](BuilderInvalidReason::InvalidTunnel) state if either room is unknown.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tunnel(&mut self, from: &str, to: &str) -> &mut Self {
        if self.invalid_reason.is_some() {
            return self;
        }

        let endpoints = self.names.get(from).copied().zip(self.names.get(to).copied());
        match endpoints {
            Some(pair) => {
                self.tunnels.push(UnorderedPair::from(pair));
                self
            }
            None => self.invalidate(BuilderInvalidReason::InvalidTunnel),
        }
    }

    /// Number of tunnels declared so far, duplicates included.
    pub fn tunnel_count(&self) -> usize {
        self.tunnels.len()
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(reason)` otherwise.
    /// A missing start or end room is only detected by [`Self::build`].
    pub fn is_valid(&self) -> Option<BuilderInvalidReason> {
        self.invalid_reason
    }

    /// Convert the state of this builder into a [`Colony`].
    ///
    /// Tunnels declared more than once collapse into a single tunnel.
    pub fn build(&self) -> Result<Colony, BuilderInvalidReason> {
        if let Some(reason) = self.invalid_reason {
            return Err(reason);
        }

        let start = self.start.ok_or(BuilderInvalidReason::MissingStart)?;
        let end = self.end.ok_or(BuilderInvalidReason::MissingEnd)?;
        let units = NonZero::new(self.units).ok_or(BuilderInvalidReason::InvalidUnitCount)?;

        let mut graph = UnGraphMap::with_capacity(self.rooms.len(), self.tunnels.len());
        for index in 0..self.rooms.len() {
            graph.add_node(RoomId(index));
        }

        let mut duplicates = 0usize;
        for UnorderedPair(a, b) in self.tunnels.iter() {
            // neighbor order follows declaration order
            // graphmap keeps the first position of a repeated edge
            if graph.add_edge(*a, *b, ()).is_some() {
                duplicates += 1;
            }
        }

        debug!(
            rooms = self.rooms.len(),
            tunnels = graph.edge_count(),
            duplicates,
            units = units.get(),
            "built colony"
        );

        Ok(Colony {
            graph,
            rooms: self.rooms.clone(),
            names: self.names.clone(),
            start,
            end,
            units,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> ColonyBuilder {
        let mut builder = ColonyBuilder::with_units(3);
        builder
            .add_start("s", (0, 0))
            .add_room("m", (1, 1))
            .add_end("e", (2, 0))
            .add_tunnel("s", "m")
            .add_tunnel("m", "e");
        builder
    }

    #[test]
    fn builds_valid_colony() {
        let colony = triangle().build().unwrap();
        assert_eq!(colony.units(), 3);
        assert_eq!(colony.room(colony.start()).name(), "s");
        assert_eq!(colony.room(colony.end()).name(), "e");
        assert_eq!(colony.find_room("m"), Some(RoomId(1)));
        assert_eq!(colony.tunnel_count(), 2);
    }

    #[test]
    fn zero_units() {
        let mut builder = ColonyBuilder::with_units(0);
        builder.add_start("s", (0, 0)).add_end("e", (1, 0)).add_tunnel("s", "e");
        assert_eq!(builder.is_valid(), Some(BuilderInvalidReason::InvalidUnitCount));
        assert_eq!(builder.build().unwrap_err(), BuilderInvalidReason::InvalidUnitCount);
    }

    #[test]
    fn first_reason_sticks() {
        let mut builder = triangle();
        builder
            .add_room("L3", (5, 5))
            .add_room("m", (5, 5))
            .add_tunnel("m", "nowhere");
        assert_eq!(builder.build().unwrap_err(), BuilderInvalidReason::InvalidRoom);
    }

    #[test]
    fn duplicate_rooms_and_roles() {
        let mut builder = triangle();
        builder.add_room("m", (3, 3));
        assert_eq!(builder.is_valid(), Some(BuilderInvalidReason::DuplicateRoom));

        let mut builder = triangle();
        builder.add_start("s2", (3, 3));
        assert_eq!(builder.is_valid(), Some(BuilderInvalidReason::DuplicateStart));

        let mut builder = triangle();
        builder.add_marked(Marker::End, "e2", (3, 3));
        assert_eq!(builder.is_valid(), Some(BuilderInvalidReason::DuplicateEnd));
    }

    #[test]
    fn missing_roles() {
        let mut builder = ColonyBuilder::with_units(1);
        builder.add_room("a", (0, 0)).add_end("e", (1, 1)).add_tunnel("a", "e");
        assert_eq!(builder.is_valid(), None);
        assert_eq!(builder.build().unwrap_err(), BuilderInvalidReason::MissingStart);

        let mut builder = ColonyBuilder::with_units(1);
        builder.add_start("s", (0, 0));
        assert_eq!(builder.build().unwrap_err(), BuilderInvalidReason::MissingEnd);
    }

    #[test]
    fn unknown_tunnel_endpoint() {
        let mut builder = triangle();
        builder.add_tunnel("e", "x");
        assert_eq!(builder.build().unwrap_err(), BuilderInvalidReason::InvalidTunnel);
    }

    #[test]
    fn duplicate_tunnels_collapse() {
        let mut builder = triangle();
        builder.add_tunnel("m", "s").add_tunnel("s", "m");
        assert_eq!(builder.tunnel_count(), 4);
        assert_eq!(builder.build().unwrap().tunnel_count(), 2);
    }
}
