use itertools::Itertools;
use tracing::{debug, trace};

use crate::group::PathGroup;
use crate::path::Path;
use crate::room::RoomId;
use crate::simulator::UnitId;

/// The chosen paths and the units travelling each of them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    pub(crate) routes: Vec<Vec<RoomId>>,
    pub(crate) assignment: Vec<Vec<UnitId>>,
    pub(crate) makespan: usize,
}

impl Plan {
    /// Per path, the rooms a unit enters in order; the start room is left out and the end room comes last.
    pub fn routes(&self) -> &[Vec<RoomId>] {
        &self.routes
    }

    /// Per path, its units in departure order.
    pub fn assignment(&self) -> &[Vec<UnitId>] {
        &self.assignment
    }

    /// Turns needed until the last unit arrives.
    pub fn makespan(&self) -> usize {
        self.makespan
    }
}

/// Greedily hand each unit to the path where it would arrive soonest.
///
/// A path's load starts at its hop count and grows by one per unit; ties go to the lowest index.
/// Returns the chosen path for every unit, in allocation order.
pub(crate) fn allocate(hops: &[usize], units: usize) -> Vec<usize> {
    let mut counts = vec![0usize; hops.len()];
    let mut order = Vec::with_capacity(units);

    for _ in 0..units {
        let Some(chosen) = hops
            .iter()
            .zip(counts.iter())
            .map(|(hops, count)| hops + count)
            .position_min()
        else {
            break;
        };
        counts[chosen] += 1;
        order.push(chosen);
    }

    order
}

/// Turn on which the last unit arrives, given how many units each path carries.
///
/// The `k`th unit on a path of `h` hops leaves on turn `k` and arrives on turn `h + k - 1`.
/// Paths left without units do not count.
pub(crate) fn makespan(hops: &[usize], counts: &[usize]) -> usize {
    hops.iter()
        .zip(counts)
        .filter(|(_, count)| **count > 0)
        .map(|(hops, count)| hops + count - 1)
        .max()
        .unwrap_or(0)
}

fn counts_of(order: &[usize], paths: usize) -> Vec<usize> {
    let mut counts = vec![0usize; paths];
    order.iter().for_each(|path| counts[*path] += 1);
    counts
}

/// Pick the group with the smallest makespan under [`allocate`], the earliest group winning ties, and lay out its plan.
///
/// Returns `None` only if `groups` is empty.
pub(crate) fn select_plan(paths: &[Path], groups: &[PathGroup], units: usize) -> Option<Plan> {
    let mut best: Option<(&PathGroup, Vec<usize>, usize)> = None;

    for group in groups {
        let hops = group
            .paths()
            .iter()
            .map(|index| paths[*index].hops())
            .collect_vec();
        let order = allocate(&hops, units);
        let turns = makespan(&hops, &counts_of(&order, hops.len()));
        trace!(paths = ?group.paths(), ?hops, turns, "evaluated group");

        if best.as_ref().map_or(true, |(_, _, best_turns)| turns < *best_turns) {
            best = Some((group, order, turns));
        }
    }

    let (group, order, turns) = best?;

    let routes = group
        .paths()
        .iter()
        .map(|index| paths[*index].route().to_vec())
        .collect_vec();

    let mut assignment = vec![Vec::new(); routes.len()];
    for (unit, path) in order.iter().enumerate() {
        assignment[*path].push(UnitId(unit + 1));
    }

    debug!(
        paths = ?group.paths(),
        units_per_path = ?assignment.iter().map(Vec::len).collect_vec(),
        makespan = turns,
        "selected path group"
    );

    Some(Plan {
        routes,
        assignment,
        makespan: turns,
    })
}
