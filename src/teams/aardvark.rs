//! Aardvark handling for 5- and 6-player games, and the invisible
//! aardvark for 4-player games.
//!
//! The aardvark is the 5th (and 6th) hitter, who asks to join a side after
//! the captain's teams form. The asked side may toss them: the aardvark
//! joins the *other* side and the wager doubles. The aardvark may instead
//! declare Tunkarri and play alone against both sides for a 3-for-2 payout.
//!
//! A 4-man game has no real aardvark, so team2 carries an invisible one;
//! tossing the ghost doubles the wager and flips the tossing side's payout
//! to 3-for-2.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};

use super::TeamSide;

/// Hole-scoped aardvark state for 5/6-player games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AardvarkState {
    /// The side the aardvark asked to join.
    pub requested_team: Option<TeamSide>,
    /// The asked side rejected the aardvark.
    pub tossed: bool,
    /// The aardvark went solo against both sides.
    pub tunkarri: bool,
}

impl AardvarkState {
    /// Ask to join a side. Asking again before a toss just re-points the
    /// request.
    pub fn request_team(&mut self, team: TeamSide) -> EngineResult<()> {
        if self.tossed {
            return Err(EngineError::IllegalAction {
                action: "request_aardvark_team".into(),
                reason: "already tossed".into(),
            });
        }
        if self.tunkarri {
            return Err(EngineError::IllegalAction {
                action: "request_aardvark_team".into(),
                reason: "tunkarri already declared".into(),
            });
        }

        self.requested_team = Some(team);
        Ok(())
    }

    /// The asked side tosses the aardvark. Returns the side the aardvark
    /// lands on; the caller doubles the wager.
    pub fn toss(&mut self) -> EngineResult<TeamSide> {
        let requested = self.requested_team.ok_or_else(|| EngineError::IllegalAction {
            action: "toss_aardvark".into(),
            reason: "no team requested".into(),
        })?;
        if self.tossed {
            return Err(EngineError::IllegalAction {
                action: "toss_aardvark".into(),
                reason: "already tossed".into(),
            });
        }

        self.tossed = true;
        Ok(requested.other())
    }

    /// Aardvark declares Tunkarri: solo against both sides, 3-for-2.
    pub fn invoke_tunkarri(&mut self, aardvark: PlayerId) -> EngineResult<PlayerId> {
        if self.tossed {
            return Err(EngineError::IllegalAction {
                action: "invoke_tunkarri".into(),
                reason: "already tossed onto a team".into(),
            });
        }

        self.tunkarri = true;
        self.requested_team = None;
        Ok(aardvark)
    }
}
