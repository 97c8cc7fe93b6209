//! Rotation and phase behavior across whole rounds.
//!
//! These tests drive the engine through real holes to verify captain
//! cycling, phase windows per player count, and Hoepfinger goat seating.

use wolf_goat_pig::{
    Action, Course, GameConfig, Phase, Player, PlayerId, QuartersEntry, RuleEngine,
};

fn players(n: u8) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), 10.0))
        .collect()
}

fn engine(n: u8) -> RuleEngine {
    RuleEngine::new(GameConfig::new(n as usize), players(n), Course::flat(18))
}

fn balanced_quarters(n: usize, winner: PlayerId, loser: PlayerId) -> Vec<QuartersEntry> {
    PlayerId::all(n)
        .map(|p| QuartersEntry {
            player: p,
            quarters: if p == winner {
                1.0
            } else if p == loser {
                -1.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Test that the captain cycles through all n players exactly once per
/// n-hole block outside Hoepfinger.
#[test]
fn test_captain_cycles_over_normal_holes() {
    let mut engine = engine(4);

    let mut captains = Vec::new();
    for _ in 0..8 {
        captains.push(engine.captain());
        engine.apply(Action::NextHole).unwrap();
    }

    // Two full cycles: each player captains twice, in the same order.
    assert_eq!(captains[0..4], captains[4..8]);
    let mut first_cycle = captains[0..4].to_vec();
    first_cycle.sort();
    assert_eq!(first_cycle, PlayerId::all(4).collect::<Vec<_>>());
}

/// Test the phase windows for each player count.
#[test]
fn test_phase_windows() {
    for (n, hole, expected) in [
        (4, 12, Phase::Normal),
        (4, 13, Phase::VinniesVariation),
        (4, 16, Phase::VinniesVariation),
        (4, 17, Phase::Hoepfinger),
        (5, 15, Phase::Normal),
        (5, 16, Phase::Hoepfinger),
        (6, 12, Phase::Normal),
        (6, 13, Phase::Hoepfinger),
    ] {
        let mut engine = engine(n);
        let snapshot = engine.apply(Action::SetCurrentHole { hole }).unwrap();
        assert_eq!(snapshot.phase, expected, "{n} players on hole {hole}");
    }
}

/// Test that Vinnie's Variation doubles the opening wager.
#[test]
fn test_variation_doubles_opening_wager() {
    let mut engine = engine(4);
    let snapshot = engine.apply(Action::SetCurrentHole { hole: 13 }).unwrap();
    assert_eq!(snapshot.betting.wager.current_wager, 2);
}

/// Test that the player furthest behind becomes the goat and can seat
/// themselves anywhere, taking the captaincy with slot 0.
#[test]
fn test_goat_seating_in_hoepfinger() {
    let mut engine = engine(4);

    // P2 loses a quarter to P0 on hole 1.
    engine
        .apply(Action::SubmitHole {
            quarters: balanced_quarters(4, PlayerId::new(0), PlayerId::new(2)),
        })
        .unwrap();

    let snapshot = engine.apply(Action::SetCurrentHole { hole: 17 }).unwrap();
    assert_eq!(snapshot.rotation.goat, Some(PlayerId::new(2)));

    let snapshot = engine
        .apply(Action::SelectGoatPosition { index: 0 })
        .unwrap();
    assert_eq!(snapshot.rotation.order[0], PlayerId::new(2));
    assert_eq!(snapshot.rotation.captain_index, 0);
}

/// Test that a goat who takes the captaincy turns the option on: captain
/// and furthest-behind are the same player, so the opening wager doubles.
#[test]
fn test_goat_captain_activates_option() {
    let mut engine = engine(4);

    engine
        .apply(Action::SubmitHole {
            quarters: balanced_quarters(4, PlayerId::new(0), PlayerId::new(2)),
        })
        .unwrap();
    engine.apply(Action::SetCurrentHole { hole: 17 }).unwrap();

    let snapshot = engine
        .apply(Action::SelectGoatPosition { index: 0 })
        .unwrap();

    assert!(snapshot.betting.wager.option_active);
    assert_eq!(snapshot.betting.wager.current_wager, 2);
}

/// Test that seating the goat outside Hoepfinger is rejected.
#[test]
fn test_goat_seating_rejected_outside_hoepfinger() {
    let mut engine = engine(4);
    assert!(engine
        .apply(Action::SelectGoatPosition { index: 0 })
        .is_err());
}

/// Test that next_hole past the end of the round is rejected.
#[test]
fn test_next_hole_past_round_end_rejected() {
    let mut engine = engine(4);
    engine.apply(Action::SetCurrentHole { hole: 18 }).unwrap();
    assert!(engine.apply(Action::NextHole).is_err());
}

/// Test that jumping to a nonexistent hole is rejected.
#[test]
fn test_set_current_hole_bounds() {
    let mut engine = engine(4);
    assert!(engine.apply(Action::SetCurrentHole { hole: 0 }).is_err());
    assert!(engine.apply(Action::SetCurrentHole { hole: 19 }).is_err());
}
