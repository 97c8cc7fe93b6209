//! Team formation: partners, solo, and the partition invariant.
//!
//! Only one side of the split is ever stored. The other side is always the
//! complement of the stored side over the full player set, so
//! `team1 ∩ team2 = ∅` and `team1 ∪ team2 = everyone` hold by construction
//! rather than by validation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};

/// The two sides of a hole. `Team1` is the stored side (the captain's side
/// in partners mode); `Team2` is always the derived complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    /// The opposing side.
    #[must_use]
    pub fn other(self) -> TeamSide {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

/// Membership list for one side. Rounds run at most 6 players, so sides
/// stay inline.
pub type Side = SmallVec<[PlayerId; 4]>;

/// How the hole's teams are split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TeamAssignment {
    /// Captain's side stored explicitly; the other side is the complement.
    Partners { team1: Side },
    /// The Pig: captain alone against everyone else.
    Solo { captain: PlayerId },
}

impl Default for TeamAssignment {
    fn default() -> Self {
        TeamAssignment::Partners {
            team1: Side::new(),
        }
    }
}

impl TeamAssignment {
    /// Members of a side, derived for the complement side.
    #[must_use]
    pub fn members(&self, side: TeamSide, player_count: usize) -> Vec<PlayerId> {
        match (self, side) {
            (TeamAssignment::Partners { team1 }, TeamSide::Team1) => team1.to_vec(),
            (TeamAssignment::Partners { team1 }, TeamSide::Team2) => PlayerId::all(player_count)
                .filter(|p| !team1.contains(p))
                .collect(),
            (TeamAssignment::Solo { captain }, TeamSide::Team1) => vec![*captain],
            (TeamAssignment::Solo { captain }, TeamSide::Team2) => PlayerId::all(player_count)
                .filter(|p| p != captain)
                .collect(),
        }
    }

    /// The side a player is on.
    #[must_use]
    pub fn side_of(&self, player: PlayerId, player_count: usize) -> TeamSide {
        if self.members(TeamSide::Team1, player_count).contains(&player) {
            TeamSide::Team1
        } else {
            TeamSide::Team2
        }
    }

    /// True when both sides have at least one player.
    #[must_use]
    pub fn is_playable(&self, player_count: usize) -> bool {
        let team1 = self.members(TeamSide::Team1, player_count);
        !team1.is_empty() && team1.len() < player_count
    }
}

/// Hole-scoped team formation state.
///
/// Resets at each hole start. The aardvark sub-state rides in
/// [`crate::teams::AardvarkState`] on the engine side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamFormation {
    pub assignment: TeamAssignment,
    /// A partner invitation the captain has made and the invitee has not
    /// yet answered.
    pub pending_partner: Option<PlayerId>,
}

impl TeamFormation {
    /// Add or remove a player from team1 (partners mode).
    ///
    /// Switching from solo back to partners starts team1 empty.
    pub fn toggle_team1_member(&mut self, player: PlayerId) {
        if matches!(self.assignment, TeamAssignment::Solo { .. }) {
            self.assignment = TeamAssignment::default();
        }

        if let TeamAssignment::Partners { team1 } = &mut self.assignment {
            if let Some(pos) = team1.iter().position(|&p| p == player) {
                team1.remove(pos);
            } else {
                team1.push(player);
            }
        }
    }

    /// Put a player solo against the field.
    pub fn set_solo_captain(&mut self, captain: PlayerId) {
        self.assignment = TeamAssignment::Solo { captain };
        self.pending_partner = None;
    }

    /// Captain invites a partner. The invitation stays pending until
    /// answered.
    pub fn request_partner(
        &mut self,
        captain: PlayerId,
        partner: PlayerId,
    ) -> EngineResult<()> {
        if captain == partner {
            return Err(EngineError::InvalidTeams {
                reason: "captain cannot partner themselves".into(),
            });
        }
        if let Some(pending) = self.pending_partner {
            return Err(EngineError::IllegalAction {
                action: "request_partner".into(),
                reason: format!("{pending} has not answered yet"),
            });
        }

        self.pending_partner = Some(partner);
        Ok(())
    }

    /// Invitee accepts: captain and partner form team1.
    pub fn accept_partner(&mut self, captain: PlayerId) -> EngineResult<PlayerId> {
        let partner = self.pending_partner.take().ok_or_else(|| {
            EngineError::IllegalAction {
                action: "accept_partner".into(),
                reason: "no partner request pending".into(),
            }
        })?;

        let mut team1 = Side::new();
        team1.push(captain);
        team1.push(partner);
        self.assignment = TeamAssignment::Partners { team1 };
        Ok(partner)
    }

    /// Invitee declines: the captain is on their own.
    pub fn decline_partner(&mut self, captain: PlayerId) -> EngineResult<PlayerId> {
        let declined = self.pending_partner.take().ok_or_else(|| {
            EngineError::IllegalAction {
                action: "decline_partner".into(),
                reason: "no partner request pending".into(),
            }
        })?;

        self.assignment = TeamAssignment::Solo { captain };
        Ok(declined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team2_is_always_the_complement() {
        let mut formation = TeamFormation::default();
        formation.toggle_team1_member(PlayerId::new(0));
        formation.toggle_team1_member(PlayerId::new(2));

        let team1 = formation.assignment.members(TeamSide::Team1, 4);
        let team2 = formation.assignment.members(TeamSide::Team2, 4);

        assert_eq!(team1, vec![PlayerId::new(0), PlayerId::new(2)]);
        assert_eq!(team2, vec![PlayerId::new(1), PlayerId::new(3)]);

        // Partition invariant: disjoint and covering.
        for p in PlayerId::all(4) {
            assert_eq!(team1.contains(&p), !team2.contains(&p));
        }
    }

    #[test]
    fn test_toggle_removes_on_second_touch() {
        let mut formation = TeamFormation::default();
        formation.toggle_team1_member(PlayerId::new(1));
        formation.toggle_team1_member(PlayerId::new(1));

        assert!(formation
            .assignment
            .members(TeamSide::Team1, 4)
            .is_empty());
    }

    #[test]
    fn test_solo_opponents_are_derived() {
        let mut formation = TeamFormation::default();
        formation.set_solo_captain(PlayerId::new(2));

        let opponents = formation.assignment.members(TeamSide::Team2, 5);
        assert_eq!(opponents.len(), 4);
        assert!(!opponents.contains(&PlayerId::new(2)));
    }

    #[test]
    fn test_partner_accept_forms_pair() {
        let mut formation = TeamFormation::default();
        let captain = PlayerId::new(0);

        formation.request_partner(captain, PlayerId::new(3)).unwrap();
        let partner = formation.accept_partner(captain).unwrap();

        assert_eq!(partner, PlayerId::new(3));
        assert_eq!(
            formation.assignment.members(TeamSide::Team1, 4),
            vec![captain, partner]
        );
    }

    #[test]
    fn test_partner_decline_leaves_captain_solo() {
        let mut formation = TeamFormation::default();
        let captain = PlayerId::new(1);

        formation.request_partner(captain, PlayerId::new(2)).unwrap();
        formation.decline_partner(captain).unwrap();

        assert_eq!(
            formation.assignment,
            TeamAssignment::Solo { captain }
        );
    }

    #[test]
    fn test_second_partner_request_rejected_while_pending() {
        let mut formation = TeamFormation::default();
        let captain = PlayerId::new(0);

        formation.request_partner(captain, PlayerId::new(1)).unwrap();
        let err = formation
            .request_partner(captain, PlayerId::new(2))
            .unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    #[test]
    fn test_self_partner_rejected() {
        let mut formation = TeamFormation::default();
        let err = formation
            .request_partner(PlayerId::new(0), PlayerId::new(0))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidTeams { .. }));
    }

    #[test]
    fn test_playability() {
        let mut formation = TeamFormation::default();
        assert!(!formation.assignment.is_playable(4));

        formation.toggle_team1_member(PlayerId::new(0));
        assert!(formation.assignment.is_playable(4));

        for p in PlayerId::all(4).skip(1) {
            formation.toggle_team1_member(p);
        }
        // Everyone on team1: nobody left to play against.
        assert!(!formation.assignment.is_playable(4));
    }
}
