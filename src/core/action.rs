//! The action vocabulary: one closed union for everything a round can do.
//!
//! Every state transition in the engine is expressed as an [`Action`] and
//! applied through [`crate::engine::RuleEngine::apply`]. The union is closed
//! on purpose: dispatch is an exhaustive `match`, so there is no default
//! branch for an unrecognized action to fall into. Payloads arriving from an
//! external surface parse through [`Action::from_json`], where an unknown tag
//! is a reported error, not a no-op.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::teams::TeamSide;

use super::player::PlayerId;

/// One player's gross score entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub gross: u32,
}

/// One player's quarters entry for a hole submit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuartersEntry {
    pub player: PlayerId,
    pub quarters: f64,
}

/// A complete game action.
///
/// Tag names follow the wire vocabulary (`offer_double`, `next_hole`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // === Hole lifecycle ===
    SetCurrentHole { hole: u8 },
    NextHole,
    LoadHoleForEdit { hole: u8 },

    // === Scores ===
    UpdateScore { player: PlayerId, gross: u32 },
    SetScores { scores: Vec<ScoreEntry> },
    SubmitHole { quarters: Vec<QuartersEntry> },
    ConcedeHole { team: TeamSide },

    // === Team formation ===
    TogglePlayerTeam { player: PlayerId },
    SetCaptain { player: PlayerId },
    GoSolo,
    RequestPartner { partner: PlayerId },
    AcceptPartner,
    DeclinePartner,

    // === Aardvark ===
    RequestAardvarkTeam { team: TeamSide },
    TossAardvark,
    InvokeTunkarri,
    TossInvisibleAardvark,

    // === Betting ===
    OfferDouble { by: PlayerId },
    AcceptDouble,
    DeclineDouble,
    InvokeFloat { by: PlayerId },
    ToggleOption,
    TurnOffOption,
    AnnounceDuncan,
    InvokeJoesSpecial { wager: u32 },

    // === Hoepfinger rotation ===
    SelectGoatPosition { index: usize },
}

impl Action {
    /// The wire tag for this action, used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCurrentHole { .. } => "set_current_hole",
            Action::NextHole => "next_hole",
            Action::LoadHoleForEdit { .. } => "load_hole_for_edit",
            Action::UpdateScore { .. } => "update_score",
            Action::SetScores { .. } => "set_scores",
            Action::SubmitHole { .. } => "submit_hole",
            Action::ConcedeHole { .. } => "concede_hole",
            Action::TogglePlayerTeam { .. } => "toggle_player_team",
            Action::SetCaptain { .. } => "set_captain",
            Action::GoSolo => "go_solo",
            Action::RequestPartner { .. } => "request_partner",
            Action::AcceptPartner => "accept_partner",
            Action::DeclinePartner => "decline_partner",
            Action::RequestAardvarkTeam { .. } => "request_aardvark_team",
            Action::TossAardvark => "toss_aardvark",
            Action::InvokeTunkarri => "invoke_tunkarri",
            Action::TossInvisibleAardvark => "toss_invisible_aardvark",
            Action::OfferDouble { .. } => "offer_double",
            Action::AcceptDouble => "accept_double",
            Action::DeclineDouble => "decline_double",
            Action::InvokeFloat { .. } => "invoke_float",
            Action::ToggleOption => "toggle_option",
            Action::TurnOffOption => "turn_off_option",
            Action::AnnounceDuncan => "announce_duncan",
            Action::InvokeJoesSpecial { .. } => "invoke_joes_special",
            Action::SelectGoatPosition { .. } => "select_goat_position",
        }
    }

    /// Parse an action from an external JSON payload.
    ///
    /// An unrecognized `type` tag (or malformed payload) is a reported
    /// [`EngineError::UnknownAction`].
    pub fn from_json(payload: &str) -> EngineResult<Self> {
        serde_json::from_str(payload).map_err(|e| EngineError::UnknownAction(e.to_string()))
    }
}

/// One entry in a hole's betting-event log.
///
/// Events are recorded as wager-affecting actions resolve, snapshotted into
/// the hole record on submit, and folded into standings (float and option
/// counts come from here).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BettingEvent {
    pub kind: BetEventKind,
    /// The player the event is attributed to, when there is one.
    pub player: Option<PlayerId>,
    pub wager_before: u32,
    pub wager_after: u32,
}

impl BettingEvent {
    /// Create a new betting event.
    #[must_use]
    pub fn new(kind: BetEventKind, player: Option<PlayerId>, before: u32, after: u32) -> Self {
        Self {
            kind,
            player,
            wager_before: before,
            wager_after: after,
        }
    }
}

/// Kinds of wager-affecting events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetEventKind {
    DoubleOffered,
    DoubleAccepted,
    DoubleDeclined,
    Float,
    Duncan,
    Tunkarri,
    SoloPig,
    OptionOn,
    OptionTurnedOff,
    JoesSpecial,
    CarryOver,
    AardvarkTossed,
    InvisibleAardvarkTossed,
}
