//! Engine error taxonomy.
//!
//! Three families, per the round-keeping design:
//! - **Validation** errors: bad quarters, missing scores, malformed teams.
//!   Reported synchronously with the numeric discrepancy, never auto-corrected.
//! - **Protocol** errors: actions that are illegal in the current phase or
//!   betting state, and unrecognized action payloads. Rejected with a specific
//!   error, never a silent no-op.
//! - **External** failures (course data, store, achievements) are *not*
//!   errors: they become [`crate::engine::Warning`]s attached to state and do
//!   not block play.

use thiserror::Error;

use crate::core::PlayerId;

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Quarters for a hole do not sum to zero.
    #[error("quarters must sum to zero, off by {imbalance:+}")]
    ZeroSumViolation { imbalance: f64 },

    /// A player has no entry in the submitted quarters or scores.
    #[error("missing entry for {player}")]
    MissingPlayerEntry { player: PlayerId },

    /// Team composition violates the partition invariant.
    #[error("invalid team composition: {reason}")]
    InvalidTeams { reason: String },

    /// An offer was made while another is still pending.
    #[error("an offer from {pending_from} is already pending")]
    OfferAlreadyPending { pending_from: PlayerId },

    /// Accept/decline with no offer on the table.
    #[error("no offer is pending")]
    NoPendingOffer,

    /// Action is not legal in the current phase or betting state.
    #[error("{action} is not allowed: {reason}")]
    IllegalAction { action: String, reason: String },

    /// A player attempted a once-per-round action a second time.
    #[error("{player} has already used the float this round")]
    FloatAlreadyUsed { player: PlayerId },

    /// An action payload could not be recognized.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Hole number outside 1..=18, or no record exists for an edit target.
    #[error("no such hole: {hole}")]
    NoSuchHole { hole: u8 },

    /// A wager value outside the allowed menu (joe's special).
    #[error("wager {wager} is not on the menu {menu:?}")]
    WagerNotOnMenu { wager: u32, menu: Vec<u32> },
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
