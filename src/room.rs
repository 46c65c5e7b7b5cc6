use std::fmt::{Display, Formatter};

use strum::{AsRefStr, EnumString};

/// Room coordinate component, as written in the map.
pub type Coord = i64;

/// Dense index of a room inside its [`Colony`](crate::Colony), in declaration order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RoomId(pub usize);

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Role {
    Start,
    End,
    #[default]
    Plain,
}

/// Map directives which flag the room declared on the following line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Marker {
    /// `##start`: the room every unit leaves from.
    #[strum(serialize = "##start")]
    Start,
    /// `##end`: the room every unit must reach.
    #[strum(serialize = "##end")]
    End,
}

impl From<Marker> for Role {
    fn from(value: Marker) -> Self {
        match value {
            Marker::Start => Role::Start,
            Marker::End => Role::End,
        }
    }
}

/// A room of the colony. Coordinates are only carried for display; the solver never reads them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room {
    pub(crate) name: String,
    // x, y
    pub(crate) location: (Coord, Coord),
    pub(crate) role: Role,
}

impl Room {
    /// Unique name of this room, as used in tunnels and moves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(x, y)` as declared.
    pub fn location(&self) -> (Coord, Coord) {
        self.location
    }

    /// Whether this room was flagged with [`Marker::Start`].
    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }

    /// Whether this room was flagged with [`Marker::End`].
    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    /// Whether `name` may be used for a room.
    ///
    /// Names beginning with `L` would be confused with unit identifiers in the output, names beginning with `#` with comments.
    /// Hyphens and whitespace are the separators of the map format.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('#')
            && !name.starts_with('L')
            && !name.chars().any(|c| c == '-' || c.is_whitespace())
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.name, self.location.0, self.location.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_ignore_case() {
        assert_eq!("##start".parse::<Marker>(), Ok(Marker::Start));
        assert_eq!("##END".parse::<Marker>(), Ok(Marker::End));
        assert!("#start".parse::<Marker>().is_err());
        assert_eq!(Marker::End.as_ref(), "##end");
    }

    #[test]
    fn room_names() {
        assert!(Room::is_valid_name("room_1"));
        assert!(Room::is_valid_name("l3"));
        assert!(!Room::is_valid_name("L3"));
        assert!(!Room::is_valid_name("#hall"));
        assert!(!Room::is_valid_name("a-b"));
        assert!(!Room::is_valid_name("a b"));
        assert!(!Room::is_valid_name(""));
    }
}
