//! The persistence boundary: a command log, not an I/O layer.
//!
//! The engine mutates its own state optimistically and enqueues
//! [`StoreCommand`]s describing what the external store should do. The
//! caller drains the queue, runs the commands against whatever backend it
//! has, and reports failures back. A failed write becomes a [`Warning`]
//! attached to state; it does **not** roll back the local mutation. That
//! trade was made deliberately: the in-memory round is authoritative and
//! the store is a trailing copy.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::scoring::HoleRecord;

/// Where a non-fatal problem came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSource {
    CourseData,
    Store,
    Achievement,
}

/// A non-fatal problem surfaced to the caller alongside state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub source: WarningSource,
    pub message: String,
}

impl Warning {
    /// Create a warning.
    #[must_use]
    pub fn new(source: WarningSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

/// One unit of work for the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StoreCommand {
    /// Persist a hole's quarters and details.
    SaveHole {
        hole: u8,
        quarters: PlayerMap<f64>,
        details: Box<HoleRecord>,
    },
    /// Fire-and-forget achievement check for each player.
    CheckAchievements { players: Vec<PlayerId> },
    /// All holes are recorded; close out the game.
    MarkComplete,
}

impl StoreCommand {
    /// Short name for warnings and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::SaveHole { .. } => "save_hole",
            StoreCommand::CheckAchievements { .. } => "check_achievements",
            StoreCommand::MarkComplete => "mark_complete",
        }
    }
}

/// External durable store for hole records.
///
/// Implementations own retries and serialization; the engine never retries.
pub trait GameStore {
    /// Persist one hole. Errors are reported as warnings, not rolled back.
    fn save_hole(&mut self, hole: u8, quarters: &PlayerMap<f64>, details: &HoleRecord)
        -> Result<(), String>;

    /// Mark the game complete once all holes are recorded.
    fn mark_complete(&mut self) -> Result<(), String>;
}

/// External achievement checker, called after each submit.
///
/// Failures never block submission.
pub trait AchievementChecker {
    fn check(&mut self, player: PlayerId) -> Result<(), String>;
}

/// Run drained commands against a store and checker, collecting warnings
/// for every failure.
pub fn run_commands(
    commands: Vec<StoreCommand>,
    store: &mut dyn GameStore,
    achievements: &mut dyn AchievementChecker,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for command in commands {
        let name = command.name();
        match command {
            StoreCommand::SaveHole {
                hole,
                quarters,
                details,
            } => {
                if let Err(e) = store.save_hole(hole, &quarters, &details) {
                    log::warn!("{name} failed for hole {hole}: {e}");
                    warnings.push(Warning::new(
                        WarningSource::Store,
                        format!("{name} failed for hole {hole}: {e}"),
                    ));
                }
            }
            StoreCommand::CheckAchievements { players } => {
                for player in players {
                    if let Err(e) = achievements.check(player) {
                        warnings.push(Warning::new(
                            WarningSource::Achievement,
                            format!("achievement check failed for {player}: {e}"),
                        ));
                    }
                }
            }
            StoreCommand::MarkComplete => {
                if let Err(e) = store.mark_complete() {
                    log::warn!("{name} failed: {e}");
                    warnings.push(Warning::new(
                        WarningSource::Store,
                        format!("{name} failed: {e}"),
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyStore {
        fail_saves: bool,
        saved: Vec<u8>,
        completed: bool,
    }

    impl GameStore for FlakyStore {
        fn save_hole(
            &mut self,
            hole: u8,
            _quarters: &PlayerMap<f64>,
            _details: &HoleRecord,
        ) -> Result<(), String> {
            if self.fail_saves {
                Err("connection reset".into())
            } else {
                self.saved.push(hole);
                Ok(())
            }
        }

        fn mark_complete(&mut self) -> Result<(), String> {
            self.completed = true;
            Ok(())
        }
    }

    struct NoAchievements;

    impl AchievementChecker for NoAchievements {
        fn check(&mut self, _player: PlayerId) -> Result<(), String> {
            Err("service unavailable".into())
        }
    }

    fn save_command(hole: u8) -> StoreCommand {
        use crate::rotation::Phase;
        use crate::teams::TeamAssignment;
        use crate::wager::PayoutRatio;

        StoreCommand::SaveHole {
            hole,
            quarters: PlayerMap::with_value(4, 0.0),
            details: Box::new(HoleRecord {
                hole,
                teams: TeamAssignment::default(),
                aardvark: None,
                invisible_aardvark_tossed: false,
                gross_scores: PlayerMap::with_value(4, None),
                points_delta: PlayerMap::with_value(4, 0.0),
                wager: 1,
                payout_ratio: PayoutRatio::EvenMoney,
                phase: Phase::Normal,
                rotation_order: PlayerId::all(4).collect(),
                captain_index: 0,
                events: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_store_failure_becomes_warning() {
        let mut store = FlakyStore {
            fail_saves: true,
            saved: Vec::new(),
            completed: false,
        };
        let mut achievements = NoAchievements;

        let warnings = run_commands(vec![save_command(3)], &mut store, &mut achievements);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, WarningSource::Store);
        assert!(warnings[0].message.contains("hole 3"));
    }

    #[test]
    fn test_achievement_failures_are_non_fatal_per_player() {
        let mut store = FlakyStore {
            fail_saves: false,
            saved: Vec::new(),
            completed: false,
        };
        let mut achievements = NoAchievements;

        let warnings = run_commands(
            vec![StoreCommand::CheckAchievements {
                players: PlayerId::all(4).collect(),
            }],
            &mut store,
            &mut achievements,
        );

        assert_eq!(warnings.len(), 4);
        assert!(warnings
            .iter()
            .all(|w| w.source == WarningSource::Achievement));
    }

    #[test]
    fn test_successful_commands_produce_no_warnings() {
        let mut store = FlakyStore {
            fail_saves: false,
            saved: Vec::new(),
            completed: false,
        };
        let mut achievements = NoAchievements;

        let warnings = run_commands(
            vec![save_command(1), StoreCommand::MarkComplete],
            &mut store,
            &mut achievements,
        );

        assert!(warnings.is_empty());
        assert_eq!(store.saved, vec![1]);
        assert!(store.completed);
    }
}
