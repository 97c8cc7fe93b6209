//! Hitting order, captaincy, and late-round phase detection.
//!
//! The rotation is the ordered list of players for the current hole. The
//! captain is whoever hits first; the pointer advances one seat per hole.
//! Late in the round the game changes shape: a 4-man game enters Vinnie's
//! Variation on holes 13-16 and Hoepfinger from 17; 5- and 6-man games
//! skip the variation and enter Hoepfinger earlier (16 and 13). In
//! Hoepfinger the goat picks their own slot in the order and the first
//! hitter of the new order becomes captain.

use serde::{Deserialize, Serialize};

use crate::core::{GoatTieBreak, PlayerId, PlayerMap, Roster};
use crate::error::{EngineError, EngineResult};
use crate::scoring::PlayerStanding;

/// Late-round phase, a function of player count and hole number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Normal,
    VinniesVariation,
    Hoepfinger,
}

/// Detect the phase for a hole.
///
/// Player counts outside 4-6 never reach here (the config rejects them),
/// but the match stays total and answers `Normal`.
#[must_use]
pub fn detect_phase(player_count: usize, hole: u8) -> Phase {
    match player_count {
        4 => match hole {
            13..=16 => Phase::VinniesVariation,
            17.. => Phase::Hoepfinger,
            _ => Phase::Normal,
        },
        5 if hole >= 16 => Phase::Hoepfinger,
        6 if hole >= 13 => Phase::Hoepfinger,
        _ => Phase::Normal,
    }
}

/// Hitting order and captaincy for the current hole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    /// Player ids in hitting order.
    pub order: Vec<PlayerId>,
    /// Index into `order` of the captain (first hitter).
    pub captain_index: usize,
    pub phase: Phase,
    /// Set only while in Hoepfinger.
    pub goat: Option<PlayerId>,
}

impl RotationState {
    /// Opening rotation: tee order, falling back to seat order.
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        let mut order: Vec<PlayerId> = roster.player_ids().collect();
        order.sort_by_key(|&p| (roster.tee_order(p), p));

        Self {
            order,
            captain_index: 0,
            phase: Phase::Normal,
            goat: None,
        }
    }

    /// The current captain.
    #[must_use]
    pub fn captain(&self) -> PlayerId {
        self.order[self.captain_index]
    }

    /// Advance the captain pointer one seat, wrapping.
    pub fn advance_captain(&mut self) {
        self.captain_index = (self.captain_index + 1) % self.order.len();
    }

    /// Update the phase for a hole, detecting Hoepfinger entry.
    ///
    /// Returns `true` when this hole is the first Hoepfinger hole, meaning
    /// a goat must be chosen before play.
    pub fn set_phase_for_hole(&mut self, player_count: usize, hole: u8) -> bool {
        let next = detect_phase(player_count, hole);
        let entering = next == Phase::Hoepfinger && self.phase != Phase::Hoepfinger;
        self.phase = next;
        if self.phase != Phase::Hoepfinger {
            self.goat = None;
        }
        entering
    }

    /// Pick the goat entering Hoepfinger: lowest cumulative quarters,
    /// ties broken by the configured rule.
    #[must_use]
    pub fn pick_goat(
        standings: &PlayerMap<PlayerStanding>,
        roster: &Roster,
        tie_break: GoatTieBreak,
    ) -> PlayerId {
        let mut goat = PlayerId::new(0);
        let mut best = f64::INFINITY;

        for (player, standing) in standings.iter() {
            let better = standing.quarters < best
                || (standing.quarters == best && Self::breaks_tie(player, goat, roster, tie_break));
            if better {
                goat = player;
                best = standing.quarters;
            }
        }

        goat
    }

    fn breaks_tie(
        candidate: PlayerId,
        incumbent: PlayerId,
        roster: &Roster,
        rule: GoatTieBreak,
    ) -> bool {
        match rule {
            GoatTieBreak::EarliestTeeOrder => {
                (roster.tee_order(candidate), candidate) < (roster.tee_order(incumbent), incumbent)
            }
            GoatTieBreak::LowestSeat => candidate < incumbent,
        }
    }

    /// The goat swaps themselves into `index`; the first hitter of the new
    /// order becomes captain.
    pub fn select_goat_position(&mut self, goat: PlayerId, index: usize) -> EngineResult<()> {
        if self.phase != Phase::Hoepfinger {
            return Err(EngineError::IllegalAction {
                action: "select_goat_position".into(),
                reason: "only available in Hoepfinger".into(),
            });
        }
        if index >= self.order.len() {
            return Err(EngineError::IllegalAction {
                action: "select_goat_position".into(),
                reason: format!("index {index} out of range"),
            });
        }

        let current = self
            .order
            .iter()
            .position(|&p| p == goat)
            .expect("goat is in the rotation");
        self.order.swap(current, index);
        self.goat = Some(goat);
        self.captain_index = 0;

        log::debug!("goat {goat} took slot {index}, captain resets to {}", self.captain());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    fn roster(n: u8) -> Roster {
        Roster::from_players(
            (0..n)
                .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), 10.0))
                .collect(),
        )
    }

    #[test]
    fn test_detect_phase_four_players() {
        assert_eq!(detect_phase(4, 1), Phase::Normal);
        assert_eq!(detect_phase(4, 12), Phase::Normal);
        assert_eq!(detect_phase(4, 13), Phase::VinniesVariation);
        assert_eq!(detect_phase(4, 16), Phase::VinniesVariation);
        assert_eq!(detect_phase(4, 17), Phase::Hoepfinger);
        assert_eq!(detect_phase(4, 18), Phase::Hoepfinger);
    }

    #[test]
    fn test_detect_phase_five_and_six_players() {
        assert_eq!(detect_phase(5, 15), Phase::Normal);
        assert_eq!(detect_phase(5, 16), Phase::Hoepfinger);
        assert_eq!(detect_phase(6, 12), Phase::Normal);
        assert_eq!(detect_phase(6, 13), Phase::Hoepfinger);
    }

    #[test]
    fn test_captain_cycles_through_all_players() {
        let roster = roster(4);
        let mut rotation = RotationState::new(&roster);

        let mut captains = Vec::new();
        for _ in 0..4 {
            captains.push(rotation.captain());
            rotation.advance_captain();
        }

        captains.sort();
        assert_eq!(captains, PlayerId::all(4).collect::<Vec<_>>());
        // Back to the opening captain after a full cycle.
        assert_eq!(rotation.captain(), captains[0]);
    }

    #[test]
    fn test_opening_order_respects_tee_order() {
        let mut players = roster(4);
        players[PlayerId::new(3)].tee_order = Some(0);
        players[PlayerId::new(0)].tee_order = Some(3);
        players[PlayerId::new(1)].tee_order = Some(1);
        players[PlayerId::new(2)].tee_order = Some(2);

        let rotation = RotationState::new(&players);
        assert_eq!(rotation.captain(), PlayerId::new(3));
    }

    #[test]
    fn test_pick_goat_lowest_quarters() {
        let roster = roster(4);
        let mut standings: PlayerMap<PlayerStanding> = PlayerMap::with_default(4);
        standings[PlayerId::new(2)].quarters = -3.0;
        standings[PlayerId::new(0)].quarters = 2.0;

        let goat =
            RotationState::pick_goat(&standings, &roster, GoatTieBreak::EarliestTeeOrder);
        assert_eq!(goat, PlayerId::new(2));
    }

    #[test]
    fn test_pick_goat_tie_break_tee_order() {
        let mut players = roster(4);
        players[PlayerId::new(3)].tee_order = Some(0);

        // Players 1 and 3 tied at the bottom; 3 tees off earlier.
        let mut standings: PlayerMap<PlayerStanding> = PlayerMap::with_default(4);
        standings[PlayerId::new(1)].quarters = -2.0;
        standings[PlayerId::new(3)].quarters = -2.0;

        let goat =
            RotationState::pick_goat(&standings, &players, GoatTieBreak::EarliestTeeOrder);
        assert_eq!(goat, PlayerId::new(3));

        let goat = RotationState::pick_goat(&standings, &players, GoatTieBreak::LowestSeat);
        assert_eq!(goat, PlayerId::new(1));
    }

    #[test]
    fn test_select_goat_position() {
        let roster = roster(4);
        let mut rotation = RotationState::new(&roster);
        rotation.set_phase_for_hole(4, 17);

        let goat = PlayerId::new(2);
        rotation.select_goat_position(goat, 0).unwrap();

        assert_eq!(rotation.captain(), goat);
        assert_eq!(rotation.goat, Some(goat));
        assert_eq!(rotation.captain_index, 0);
    }

    #[test]
    fn test_select_goat_position_outside_hoepfinger_rejected() {
        let roster = roster(4);
        let mut rotation = RotationState::new(&roster);

        let err = rotation.select_goat_position(PlayerId::new(1), 0).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    #[test]
    fn test_phase_entry_flag() {
        let roster = roster(4);
        let mut rotation = RotationState::new(&roster);

        assert!(!rotation.set_phase_for_hole(4, 13));
        assert!(rotation.set_phase_for_hole(4, 17));
        // Already in Hoepfinger: no second entry.
        assert!(!rotation.set_phase_for_hole(4, 18));
    }
}
