use logic_puzzles::Error;
use logic_puzzles::modeling::{Check, ConstraintSet, Domain, Solution};
use logic_puzzles::puzzles::Puzzle;
use logic_puzzles::puzzles::icecream::{IceCream, Kid};
use logic_puzzles::puzzles::new_years::NewYears;
use logic_puzzles::puzzles::schedule::{Class, Period, Schedule};
use logic_puzzles::puzzles::zebra::{House, Nation, Position, Zebra};
use logic_puzzles::sat::dimacs::write_dimacs;
use std::collections::HashSet;

/// Rebuilds `constraints` with its assertions in a seeded random order.
fn shuffled(constraints: &ConstraintSet, seed: u64) -> ConstraintSet {
    let mut assertions = constraints.assertions().to_vec();
    fastrand::Rng::with_seed(seed).shuffle(&mut assertions);
    assertions
        .into_iter()
        .fold(ConstraintSet::new(), |cs, a| match a.label {
            Some(label) => cs.clue(label, a.formula),
            None => cs.assert(a.formula),
        })
}

fn keys<D: Domain>(solutions: &[Solution<D>]) -> HashSet<Vec<(D, Vec<&'static str>)>> {
    solutions
        .iter()
        .map(|s| {
            s.key()
                .into_iter()
                .map(|(d, values)| (d, values.to_vec()))
                .collect()
        })
        .collect()
}

#[test]
fn zebra_answers_the_two_questions() {
    let (cs, zebra) = Zebra::build().unwrap();
    let model = cs.solve().unwrap();
    let water = model.constant(&zebra.water_house).unwrap();
    let owner = model.constant(&zebra.zebra_house).unwrap();
    assert_eq!(model.value(&zebra.nationality, water).unwrap(), Nation::Norway);
    assert_eq!(model.value(&zebra.nationality, owner).unwrap(), Nation::Japan);
}

#[test]
fn zebra_positions_form_a_bijection() {
    let (cs, zebra) = Zebra::build().unwrap();
    let model = cs.solve().unwrap();
    let positions: HashSet<Position> = House::ALL
        .iter()
        .map(|&h| model.value(&zebra.position, h).unwrap())
        .collect();
    assert_eq!(positions.len(), House::size());
    let numbers: Vec<i64> = zebra.number.values().into_iter().map(|(_, n)| n).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn zebra_solution_is_unique_in_every_model() {
    let (cs, zebra) = Zebra::build().unwrap();
    let solutions = zebra.solutions(&cs).unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].get(House::Green, "pet"), Some("zebra"));
    assert_eq!(solutions[0].get(House::Yellow, "drinks"), Some("water"));
}

#[test]
fn schedule_has_chemistry_fourth_in_every_solution() {
    let (cs, schedule) = Schedule::build().unwrap();
    let solutions = schedule.solutions(&cs).unwrap();
    assert!(!solutions.is_empty());
    for solution in &solutions {
        assert_eq!(
            solution.model.value(&schedule.class, Period::Fourth).unwrap(),
            Class::Chem
        );
    }
}

#[test]
fn enumeration_is_deterministic_and_duplicate_free() {
    let (cs, ice_cream) = IceCream::build().unwrap();
    let first = ice_cream.solutions(&cs).unwrap();
    let second = ice_cream.solutions(&cs).unwrap();
    assert_eq!(keys(&first).len(), first.len());
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn relaxing_a_puzzle_enumerates_more_distinct_solutions() {
    let (cs, ice_cream) = IceCream::build().unwrap();
    // Keep only the structural constraints and the time clues.
    let relaxed = cs
        .assertions()
        .iter()
        .filter(|a| {
            a.label.as_deref().is_none_or(|l| {
                l.starts_with("George is picked up") || l.contains("never a")
            })
        })
        .fold(ConstraintSet::new(), |acc, a| acc.assert(a.formula.clone()));
    let time: [&dyn logic_puzzles::modeling::Projection<Kid>; 1] = [&ice_cream.time];
    let solutions = logic_puzzles::modeling::all_solutions(&relaxed, &time).unwrap();
    // Luc 4:00, George 5:00, Steven at 5:30 or 6:00: 2 * 2 timetables.
    // Luc 4:30, George 5:30, Steven 6:00: 2 more.
    assert_eq!(solutions.len(), 6);
    assert_eq!(keys(&solutions).len(), solutions.len());
}

#[test]
fn clue_order_does_not_change_the_solution_set() {
    let (cs, schedule) = Schedule::build().unwrap();
    let expected = keys(&schedule.solutions(&cs).unwrap());
    for seed in [1, 7, 42] {
        let reordered = shuffled(&cs, seed);
        assert_eq!(keys(&schedule.solutions(&reordered).unwrap()), expected);
    }
}

#[test]
fn contradictory_clues_are_reported_not_panicked() {
    let (cs, _) = NewYears::build().unwrap();
    match cs.solve() {
        Err(Error::Unsatisfiable { clues }) => assert!(!clues.is_empty()),
        other => panic!("expected unsatisfiable, got {other:?}"),
    }
    let (cs, new_years) = NewYears::build().unwrap();
    assert!(new_years.solutions(&cs).unwrap().is_empty());
}

#[test]
fn contradiction_is_found_whatever_the_clue_order() {
    let (cs, _) = NewYears::build().unwrap();
    for seed in [3, 11] {
        assert!(matches!(shuffled(&cs, seed).check(), Check::Unsat { .. }));
    }
}

#[test]
fn dimacs_export_matches_the_encoding() {
    let (cs, _) = Zebra::build().unwrap();
    let encoding = cs.encode();
    let mut out = Vec::new();
    write_dimacs(&mut out, &encoding.cnf, &encoding.comments(cs.symbols())).unwrap();
    let text = String::from_utf8(out).unwrap();
    let header = format!(
        "p cnf {} {}",
        encoding.cnf.num_vars,
        encoding.cnf.clauses.len()
    );
    assert!(text.lines().any(|line| line == header));
    assert!(text.starts_with("c function nationality: House >-> Nation"));
    assert_eq!(
        text.lines().filter(|l| l.ends_with(" 0")).count(),
        encoding.cnf.clauses.len()
    );
}
