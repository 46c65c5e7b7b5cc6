#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use itertools::Itertools;

    use crate::builder::BuilderInvalidReason;
    use crate::colony::{Colony, SolveFailure};
    use crate::parser::parse_colony;
    use crate::room::RoomId;
    use crate::simulator::UnitId;

    /// A short path through `a` and `b` blocks two longer ones which are disjoint from each other.
    fn blocking(units: usize) -> String {
        format!("{units}
##start
s 0 0
a 1 0
b 2 0
y1 1 1
y2 2 1
z1 0 2
z2 1 2
##end
e 3 0
s-a
a-b
b-e
a-y1
y1-y2
y2-e
s-z1
z1-z2
z2-b
")
    }

    fn route_names(colony: &Colony, route: &[RoomId]) -> String {
        route.iter().map(|room| colony.room(*room).name()).join(",")
    }

    /// Replay the schedule and check every move against the colony's rules.
    fn assert_legal(colony: &Colony, text: &str) {
        let schedule = colony.solve().unwrap();
        let mut positions: HashMap<UnitId, RoomId> = HashMap::new();
        let mut arrived = HashSet::new();

        for turn in schedule.turns() {
            let mut moved = HashSet::new();
            for step in turn.moves() {
                assert!(
                    moved.insert(step.unit),
                    "{} moved twice in turn {}\n{text}",
                    step.unit,
                    turn.number()
                );
                assert!(!arrived.contains(&step.unit));

                let from = positions.get(&step.unit).copied().unwrap_or(colony.start());
                let to = colony.find_room(step.room).unwrap();
                assert!(
                    colony.neighbors(from).any(|room| room == to),
                    "{} has no tunnel to {}",
                    step.unit,
                    step.room
                );

                positions.insert(step.unit, to);
                if step.arrived {
                    assert_eq!(to, colony.end());
                    arrived.insert(step.unit);
                }
            }

            let occupied = positions
                .iter()
                .filter(|(unit, _)| !arrived.contains(*unit))
                .map(|(_, room)| *room)
                .collect_vec();
            assert!(occupied.iter().all_unique(), "shared room after turn {}", turn.number());
        }

        let assigned = schedule.plan().assignment().iter().map(Vec::len).sum::<usize>();
        assert_eq!(assigned, colony.units());
        assert_eq!(arrived.len(), colony.units());
        assert_eq!(schedule.turns().len(), schedule.plan().makespan());
    }

    #[test]
    fn linear_colony() {
        let colony = parse_colony("4
##start
0 0 3
2 2 5
3 4 0
##end
1 8 3
0-2
2-3
3-1
").unwrap();

        let schedule = colony.solve().unwrap();
        assert_eq!(
            format!("{}", schedule),
            "turn 1: L1-2 \nturn 2: L1-3 L2-2 \nturn 3: L1-1 L2-3 L3-2 \nturn 4: L2-1 L3-3 L4-2 \nturn 5: L3-1 L4-3 \nturn 6: L4-1 \n"
        );
        assert_eq!(schedule.plan().makespan(), 6);
    }

    #[test]
    fn equal_paths_share_the_load() {
        let colony = parse_colony("100
##start
s 0 0
a1 1 0
a2 2 0
b1 1 1
b2 2 1
##end
e 3 0
s-a1
a1-a2
a2-e
s-b1
b1-b2
b2-e
").unwrap();

        let plan = colony.plan(&Default::default()).unwrap();
        assert_eq!(plan.assignment().iter().map(Vec::len).collect_vec(), vec![50, 50]);
        assert_eq!(plan.makespan(), 52);
        assert_eq!(colony.solve().unwrap().turns().len(), 52);
    }

    #[test]
    fn short_path_wins_for_few_units() {
        let colony = parse_colony(&blocking(2)).unwrap();
        let plan = colony.plan(&Default::default()).unwrap();
        assert_eq!(plan.makespan(), 4);
        assert_eq!(
            plan.routes().iter().map(|route| route_names(&colony, route)).collect_vec(),
            vec!["a,b,e"]
        );

        let colony = parse_colony(&blocking(4)).unwrap();
        let plan = colony.plan(&Default::default()).unwrap();
        assert_eq!(plan.makespan(), 5);
        assert_eq!(
            plan.routes().iter().map(|route| route_names(&colony, route)).collect_vec(),
            vec!["a,y1,y2,e", "z1,z2,b,e"]
        );
        assert_eq!(plan.assignment(), &[vec![UnitId(1), UnitId(3)], vec![UnitId(2), UnitId(4)]]);
    }

    #[test]
    fn schedules_obey_the_rules() {
        for units in [1, 2, 3, 4, 7, 20] {
            let text = blocking(units);
            assert_legal(&parse_colony(&text).unwrap(), &text);
        }
    }

    #[test]
    fn solving_is_deterministic() {
        let text = blocking(9);
        let first = parse_colony(&text).unwrap().solve().unwrap().to_string();
        let second = parse_colony(&text).unwrap().solve().unwrap().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn more_units_never_take_fewer_turns() {
        let makespans = (1..=30)
            .map(|units| {
                let colony = parse_colony(&blocking(units)).unwrap();
                colony.plan(&Default::default()).unwrap().makespan()
            })
            .collect_vec();
        assert!(makespans.iter().tuple_windows().all(|(a, b)| a <= b), "{makespans:?}");
    }

    #[test]
    fn unreachable_end() {
        let colony = parse_colony("3
##start
s 0 0
a 1 0
##end
e 2 0
b 3 0
s-a
e-b
").unwrap();

        let failure = colony.solve().unwrap_err();
        assert_eq!(failure, SolveFailure::NoPathFound);
        assert_eq!(failure.to_string(), "invalid data format, no path found");
    }

    #[test]
    fn reserved_room_name() {
        let failure = parse_colony("1
##start
s 0 0
L3 1 0
##end
e 2 0
s-L3
L3-e
").unwrap_err();

        assert_eq!(failure, BuilderInvalidReason::InvalidRoom);
        assert_eq!(failure.to_string(), "invalid data format, invalid room format");
    }
}
