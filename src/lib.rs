//! # wolf-goat-pig
//!
//! Rules and betting-escalation engine for Wolf Goat Pig, a multi-player
//! golf wagering game with rotating captaincy, team formation, handicap
//! stroke allocation, and a stack of optional betting modifiers.
//!
//! ## Design Principles
//!
//! 1. **One state, one reducer**: all round state lives in `RuleEngine`
//!    and every mutation arrives as an `Action` through a single
//!    exhaustive dispatch. Unknown actions are reported errors, never
//!    silent no-ops.
//!
//! 2. **Derived, never stored**: the second team is always the complement
//!    of the first, and standings are always a re-fold of the hole
//!    ledger. The partition and zero-sum invariants hold by construction.
//!
//! 3. **Configuration over constants**: base wager, carry-over cap,
//!    declined-double policy, and goat tie-break are `GameConfig` fields,
//!    because course rules differ between groups.
//!
//! 4. **No I/O inside the engine**: persistence is a drained command log;
//!    failed writes surface as warnings and never roll back local state.
//!
//! ## Modules
//!
//! - `core`: player ids, roster, configuration, the action vocabulary
//! - `rotation`: hitting order, captaincy, Vinnie's Variation, Hoepfinger
//! - `teams`: partners/solo formation and the aardvark variants
//! - `wager`: the wager ledger and the offer/accept/decline protocol
//! - `strokes`: course data and the Creecher half-stroke allocation
//! - `scoring`: zero-sum validation, the hole ledger, folded standings
//! - `engine`: the orchestrating rules engine and persistence boundary

pub mod core;
pub mod engine;
pub mod error;
pub mod rotation;
pub mod scoring;
pub mod strokes;
pub mod teams;
pub mod wager;

// Re-export commonly used types
pub use crate::core::{
    Action, BetEventKind, BettingEvent, DeclinedDoublePolicy, GameConfig, GoatTieBreak, Player,
    PlayerId, PlayerMap, QuartersEntry, Roster, ScoreEntry,
};

pub use crate::error::{EngineError, EngineResult};

pub use crate::rotation::{detect_phase, Phase, RotationState};

pub use crate::teams::{AardvarkState, TeamAssignment, TeamFormation, TeamSide};

pub use crate::wager::{BettingOffer, OfferProtocol, OfferStatus, PayoutRatio, WagerState};

pub use crate::strokes::{allocate_strokes, Course, CourseHole, StrokeAllocation};

pub use crate::scoring::{
    fold_standings, validate_quarters, HoleHistory, HoleRecord, PlayerStanding,
    ZERO_SUM_TOLERANCE,
};

pub use crate::engine::{
    run_commands, AchievementChecker, GameStore, RuleEngine, Snapshot, StoreCommand, Warning,
    WarningSource,
};
