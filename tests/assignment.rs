//! End-to-end draws through the solver.

use std::collections::HashSet;

use gift_exchange::config::SolverConfig;
use gift_exchange::exchange::{ExclusionSet, Solver};
use gift_exchange::matching::{EdgeRegistry, MatchError, Side};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod common;

#[test]
fn test_three_participants_form_a_cycle() {
    let solver = Solver::default();
    let people = [1, 2, 3];

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment = solver
            .solve_with_rng(&people, &ExclusionSet::new(), &mut rng)
            .unwrap();
        common::assert_derangement(&assignment, &people);

        // A derangement of three is one of the two 3-cycles.
        let one = *assignment.receiver_of(&1).unwrap();
        let two = *assignment.receiver_of(&one).unwrap();
        assert_eq!(assignment.receiver_of(&two), Some(&1));
    }
}

#[test]
fn test_mutually_excluded_pair_is_incomplete() {
    let solver = Solver::default();
    let mut exclusions = ExclusionSet::new();
    exclusions.forbid(1, 2);

    let err = solver.solve(&[1, 2], &exclusions).unwrap_err();
    assert_eq!(err, MatchError::IncompleteMatching { matched: 0, total: 2 });
}

#[test]
fn test_ten_participants_one_exclusion_always_complete() {
    let solver = Solver::default();
    let people: Vec<char> = ('A'..='J').collect();
    let mut exclusions = ExclusionSet::new();
    exclusions.forbid('A', 'B');

    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..100 {
        let assignment = solver.solve_with_rng(&people, &exclusions, &mut rng).unwrap();
        common::assert_derangement(&assignment, &people);
        assert_ne!(assignment.receiver_of(&'A'), Some(&'B'));
        assert_ne!(assignment.receiver_of(&'B'), Some(&'A'));
    }
}

#[test]
fn test_two_participants_swap() {
    let solver = Solver::default();
    let assignment = solver.solve(&["x", "y"], &ExclusionSet::new()).unwrap();
    assert_eq!(assignment.receiver_of(&"x"), Some(&"y"));
    assert_eq!(assignment.receiver_of(&"y"), Some(&"x"));
}

#[test]
fn test_exclusions_respected_under_pressure() {
    // Couples plus last year's draw leave few legal options.
    let solver = Solver::default();
    let people = ["a1", "a2", "b1", "b2", "c1", "c2"];
    let mut exclusions = ExclusionSet::new();
    exclusions.forbid("a1", "a2");
    exclusions.forbid("b1", "b2");
    exclusions.forbid("c1", "c2");
    exclusions.forbid_one_way("a1", "b1");
    exclusions.forbid_one_way("b1", "c1");
    exclusions.forbid_one_way("c1", "a1");

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let assignment = solver.solve_with_rng(&people, &exclusions, &mut rng).unwrap();
        common::assert_derangement(&assignment, &people);
        for pair in assignment.iter() {
            assert!(!exclusions.contains(&pair.giver, &pair.receiver));
        }
    }
}

#[test]
fn test_hall_violation_detected() {
    // Four people where three may only give to "d": at most one of them can.
    let solver = Solver::default();
    let people = ["a", "b", "c", "d"];
    let mut exclusions = ExclusionSet::new();
    for giver in ["a", "b", "c"] {
        for receiver in ["a", "b", "c"] {
            if giver != receiver {
                exclusions.forbid_one_way(giver, receiver);
            }
        }
    }

    let err = solver.solve(&people, &exclusions).unwrap_err();
    assert_eq!(err, MatchError::IncompleteMatching { matched: 2, total: 4 });
}

#[test]
fn test_repeated_draws_vary() {
    let solver = Solver::default();
    let people: Vec<u32> = (0..8).collect();
    let exclusions = ExclusionSet::new();

    let outcomes: HashSet<Vec<u32>> = (0..30)
        .map(|_| {
            let assignment = solver.solve(&people, &exclusions).unwrap();
            common::assert_derangement(&assignment, &people);
            people.iter().map(|p| *assignment.receiver_of(p).unwrap()).collect()
        })
        .collect();
    assert!(outcomes.len() > 1, "thirty draws should not all agree");
}

#[test]
fn test_seeded_config_reproducible() {
    let solver = Solver::new(SolverConfig {
        seed: Some(2024),
        ..SolverConfig::default()
    });
    let people: Vec<u32> = (0..15).collect();
    let first = solver.solve(&people, &ExclusionSet::new()).unwrap();
    let second = solver.solve(&people, &ExclusionSet::new()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_large_group_completes() {
    let solver = Solver::default();
    let people: Vec<u32> = (0..300).collect();
    let mut exclusions = ExclusionSet::new();
    for p in (0..300).step_by(2) {
        exclusions.forbid(p, p + 1);
    }

    let assignment = solver.solve(&people, &exclusions).unwrap();
    common::assert_derangement(&assignment, &people);
}

#[test]
fn test_register_edge_bounds_always_enforced() {
    let mut registry = EdgeRegistry::new(3, 3);
    for g in 0..3 {
        for r in 0..3 {
            if g != r {
                registry.register_edge(g, r).unwrap();
            }
        }
    }

    assert_eq!(
        registry.register_edge(3, 0),
        Err(MatchError::InvalidIndex { side: Side::Giver, index: 3, bound: 3 })
    );
    assert_eq!(
        registry.register_edge(0, usize::MAX),
        Err(MatchError::InvalidIndex { side: Side::Receiver, index: usize::MAX, bound: 3 })
    );
}
