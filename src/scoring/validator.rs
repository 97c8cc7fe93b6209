//! Zero-sum validation of a hole's quarters.
//!
//! Quarters move between players; they are never created or destroyed, so
//! a hole's entries must sum to zero. Violations report the numeric
//! imbalance, and nothing is ever auto-corrected.

use crate::core::{PlayerId, PlayerMap, QuartersEntry};
use crate::error::{EngineError, EngineResult};

/// Absolute tolerance on the zero-sum check.
pub const ZERO_SUM_TOLERANCE: f64 = 1e-3;

/// Validate submitted quarters: one numeric entry per player, summing to
/// zero within tolerance. Returns the entries as a dense per-player map.
pub fn validate_quarters(
    entries: &[QuartersEntry],
    player_count: usize,
) -> EngineResult<PlayerMap<f64>> {
    let mut quarters: PlayerMap<Option<f64>> = PlayerMap::with_value(player_count, None);

    for entry in entries {
        if entry.player.index() >= player_count {
            return Err(EngineError::MissingPlayerEntry {
                player: entry.player,
            });
        }
        quarters[entry.player] = Some(entry.quarters);
    }

    for player in PlayerId::all(player_count) {
        if quarters[player].is_none() {
            return Err(EngineError::MissingPlayerEntry { player });
        }
    }

    let total: f64 = quarters.iter().map(|(_, q)| q.unwrap_or(0.0)).sum();
    if total.abs() > ZERO_SUM_TOLERANCE {
        return Err(EngineError::ZeroSumViolation { imbalance: total });
    }

    Ok(PlayerMap::new(player_count, |p| {
        quarters[p].expect("checked above")
    }))
}
