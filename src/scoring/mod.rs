//! Zero-sum validation, the hole ledger, and folded standings.

pub mod history;
pub mod standings;
pub mod validator;

pub use history::{HoleHistory, HoleRecord};
pub use standings::{fold_standings, PlayerStanding};
pub use validator::{validate_quarters, ZERO_SUM_TOLERANCE};
