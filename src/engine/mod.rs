//! The rules engine: state, action dispatch, and the persistence boundary.

mod dispatch;
pub mod persistence;
pub mod state;

pub use persistence::{
    run_commands, AchievementChecker, GameStore, StoreCommand, Warning, WarningSource,
};
pub use state::{BettingView, RuleEngine, Snapshot};
