//! Reader for the line-oriented map format.
//!
//! ```text
//! <unit count>
//! ##start
//! <name> <x> <y>
//! <name> <x> <y>
//! ##end
//! <name> <x> <y>
//! <name>-<name>
//! ```
//!
//! Markers may appear anywhere and flag the room on the following line.
//! Other lines starting with `#` are comments.
//! Rooms must all be declared before the first tunnel.

use itertools::Itertools;
use tracing::trace;

use crate::builder::{BuilderInvalidReason, ColonyBuilder};
use crate::colony::Colony;
use crate::room::{Coord, Marker, Room};

/// Fewest lines that can describe a colony: count, two markers, two rooms, one tunnel.
const MIN_LINES: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct RoomLine<'a> {
    name: &'a str,
    location: (Coord, Coord),
}

fn is_room_line(line: &str) -> bool {
    !line.contains('-') && line.split_whitespace().count() == 3
}

fn is_tunnel_line(line: &str) -> bool {
    match line.split('-').collect_tuple() {
        Some((from, to)) => !from.is_empty() && !to.is_empty(),
        None => false,
    }
}

fn parse_room_line(line: &str) -> Result<RoomLine<'_>, BuilderInvalidReason> {
    let (name, x, y) = line
        .split_whitespace()
        .collect_tuple()
        .ok_or(BuilderInvalidReason::InvalidRoom)?;

    if !Room::is_valid_name(name) {
        return Err(BuilderInvalidReason::InvalidRoom);
    }

    match (x.parse::<Coord>(), y.parse::<Coord>()) {
        (Ok(x), Ok(y)) => Ok(RoomLine { name, location: (x, y) }),
        _ => Err(BuilderInvalidReason::InvalidRoom),
    }
}

fn parse_unit_count(line: Option<&&str>) -> Result<usize, BuilderInvalidReason> {
    line.and_then(|line| line.trim().parse::<i64>().ok())
        .filter(|units| *units >= 1)
        .and_then(|units| usize::try_from(units).ok())
        .ok_or(BuilderInvalidReason::InvalidUnitCount)
}

type Extracted<'a> = (Vec<(Marker, RoomLine<'a>)>, Vec<&'a str>);

/// Separate marked rooms and comments from the remaining content lines.
fn extract_markers<'a>(lines: &[&'a str]) -> Result<Extracted<'a>, BuilderInvalidReason> {
    let mut marked: Vec<(Marker, RoomLine<'a>)> = Vec::with_capacity(2);
    let mut content = Vec::with_capacity(lines.len());

    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        match line.parse::<Marker>() {
            Ok(marker) => {
                if marked.iter().any(|(seen, _)| *seen == marker) {
                    return Err(BuilderInvalidReason::duplicate(marker));
                }
                let room = lines
                    .get(index + 1)
                    .copied()
                    .ok_or(BuilderInvalidReason::missing(marker))?;
                marked.push((marker, parse_room_line(room)?));
                index += 2;
                continue;
            }
            Err(_) if line.starts_with('#') => {}
            Err(_) => content.push(line),
        }
        index += 1;
    }

    for marker in [Marker::Start, Marker::End] {
        if !marked.iter().any(|(seen, _)| *seen == marker) {
            return Err(BuilderInvalidReason::missing(marker));
        }
    }

    Ok((marked, content))
}

/// Read a colony from map text, stopping at the first problem.
pub fn parse_colony(text: &str) -> Result<Colony, BuilderInvalidReason> {
    let lines = text.lines().collect_vec();
    if lines.len() < MIN_LINES {
        return Err(BuilderInvalidReason::InvalidFormat);
    }

    let (marked, content) = extract_markers(&lines)?;
    let units = parse_unit_count(content.first())?;

    let mut builder = ColonyBuilder::with_units(units);
    for (marker, room) in &marked {
        builder.add_marked(*marker, room.name, room.location);
    }

    let body = content.get(1..).unwrap_or_default();
    let first_tunnel = body
        .iter()
        .position(|line| !is_room_line(line))
        .unwrap_or(body.len());
    let (rooms, tunnels) = body.split_at(first_tunnel);

    for line in rooms {
        let room = parse_room_line(line)?;
        builder.add_room(room.name, room.location);
    }

    if tunnels.is_empty() {
        return Err(BuilderInvalidReason::InvalidFormat);
    }
    for line in tunnels {
        if !is_tunnel_line(line) {
            return Err(BuilderInvalidReason::InvalidFormat);
        }
        if let Some((from, to)) = line.split('-').collect_tuple() {
            builder.add_tunnel(from, to);
        }
    }

    trace!(
        marked = marked.len(),
        rooms = rooms.len(),
        tunnels = builder.tunnel_count(),
        "parsed map"
    );

    builder.build()
}
