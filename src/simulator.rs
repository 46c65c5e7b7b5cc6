use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use tracing::debug;

use crate::colony::Colony;
use crate::scheduler::Plan;

/// 1-based unit identifier, in allocation order. Printed as `L<id>`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UnitId(pub usize);

impl Display for UnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    /// Still in the start room.
    Waiting,
    /// In the room at this index of the route.
    InTransit(usize),
    Arrived,
}

#[derive(Clone, Copy, Debug)]
struct Unit {
    path: usize,
    position: Position,
}

/// One unit entering one room.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Move<'c> {
    /// The unit moving.
    pub unit: UnitId,
    /// Name of the room entered.
    pub room: &'c str,
    /// The room entered is the end room.
    pub arrived: bool,
}

impl Display for Move<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.unit, self.room)
    }
}

/// Every move made during one turn, in path order and then departure order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Turn<'c> {
    pub(crate) number: usize,
    pub(crate) moves: Vec<Move<'c>>,
}

impl<'c> Turn<'c> {
    /// 1-based turn number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The moves made this turn.
    pub fn moves(&self) -> &[Move<'c>] {
        &self.moves
    }

    /// Render this turn like its [`Display`] impl, but with `render` writing each move.
    pub fn display_with<F>(&self, render: F) -> TurnDisplay<'_, 'c, F>
    where
        F: Fn(&Move<'c>, &mut Formatter<'_>) -> fmt::Result,
    {
        TurnDisplay { turn: self, render }
    }
}

impl Display for Turn<'_> {
    /// `turn <n>: ` followed by every move and a space each.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.display_with(|step, f| write!(f, "{}", step)).fmt(f)
    }
}

/// A [`Turn`] rendered with a custom move formatter, see [`Turn::display_with`].
pub struct TurnDisplay<'t, 'c, F> {
    turn: &'t Turn<'c>,
    render: F,
}

impl<'c, F> Display for TurnDisplay<'_, 'c, F>
where
    F: Fn(&Move<'c>, &mut Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "turn {}: ", self.turn.number)?;
        for step in &self.turn.moves {
            (self.render)(step, f)?;
            f.write_str(" ")?;
        }
        Ok(())
    }
}

/// The solution of a [`Colony`]: the plan it followed and the turns it took.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule<'c> {
    pub(crate) plan: Plan,
    pub(crate) turns: Vec<Turn<'c>>,
}

impl<'c> Schedule<'c> {
    /// The plan that was played.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Every turn, in order. There are exactly [`Plan::makespan`] of them.
    pub fn turns(&self) -> &[Turn<'c>] {
        &self.turns
    }
}

impl Display for Schedule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for turn in &self.turns {
            writeln!(f, "{}", turn)?;
        }
        Ok(())
    }
}

/// Play `plan` turn by turn until every unit has reached the end room.
///
/// Within a turn, paths are visited in order and each path's units in departure order.
/// A waiting unit leaves the start room only once the unit ahead of it has left, so a path releases one unit per turn;
/// together with the disjointness of the paths this keeps every room but start and end to a single occupant.
pub(crate) fn simulate(colony: &Colony, plan: Plan) -> Schedule<'_> {
    // indexed by UnitId - 1
    let mut units = vec![
        Unit {
            path: 0,
            position: Position::Waiting,
        };
        plan.assignment.iter().map(Vec::len).sum()
    ];
    for (path, ids) in plan.assignment.iter().enumerate() {
        for id in ids {
            units[id.0 - 1].path = path;
        }
    }

    let mut outstanding = units.len();
    let mut turns = Vec::with_capacity(plan.makespan);

    while outstanding > 0 {
        let mut moves = Vec::new();

        for (path, ids) in plan.assignment.iter().enumerate() {
            let route = &plan.routes[path];

            for id in ids {
                let unit = &mut units[id.0 - 1];
                debug_assert_eq!(unit.path, path);

                let step = match unit.position {
                    Position::Arrived => continue,
                    Position::Waiting => 0,
                    Position::InTransit(step) => step + 1,
                };

                let room = route[step];
                let arrived = room == colony.end;
                unit.position = if arrived { Position::Arrived } else { Position::InTransit(step) };
                if arrived {
                    outstanding -= 1;
                }

                moves.push(Move {
                    unit: *id,
                    room: colony.room(room).name(),
                    arrived,
                });

                if step == 0 {
                    // the rest of this path is still waiting behind this unit
                    break;
                }
            }
        }

        turns.push(Turn {
            number: turns.len() + 1,
            moves,
        });
    }

    debug!(
        turns = turns.len(),
        moves = turns.iter().map(|turn| turn.moves.len()).sum::<usize>(),
        arrivals = turns
            .iter()
            .flat_map(|turn| turn.moves.iter())
            .filter(|step| step.arrived)
            .count(),
        "simulated schedule"
    );
    debug_assert_eq!(turns.len(), plan.makespan);

    Schedule {
        plan,
        turns,
    }
}
