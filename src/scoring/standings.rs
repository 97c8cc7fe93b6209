//! Cumulative standings, folded from history.
//!
//! Standings are derived data. Any edit to any hole triggers a full
//! re-fold rather than an incremental patch; at 18 holes the cost is
//! nothing and the consistency guarantee is total: standings are a pure
//! function of the ledger.

use serde::{Deserialize, Serialize};

use crate::core::{BetEventKind, PlayerMap};
use crate::teams::TeamAssignment;

use super::history::HoleHistory;

/// One player's cumulative position in the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// Net quarters won or lost.
    pub quarters: f64,
    /// Holes played solo (pig, duncan, or tunkarri).
    pub solo_count: u32,
    /// Floats invoked.
    pub float_count: u32,
    /// Holes where this player's option was on.
    pub option_count: u32,
}

/// Fold the full ledger into per-player standings.
#[must_use]
pub fn fold_standings(history: &HoleHistory, player_count: usize) -> PlayerMap<PlayerStanding> {
    let mut standings: PlayerMap<PlayerStanding> = PlayerMap::with_default(player_count);

    for record in history.iter() {
        for (player, delta) in record.points_delta.iter() {
            standings[player].quarters += delta;
        }

        if let TeamAssignment::Solo { captain } = record.teams {
            standings[captain].solo_count += 1;
        }

        for event in &record.events {
            let Some(player) = event.player else { continue };
            match event.kind {
                BetEventKind::Float => standings[player].float_count += 1,
                BetEventKind::OptionOn => standings[player].option_count += 1,
                BetEventKind::Tunkarri => standings[player].solo_count += 1,
                _ => {}
            }
        }
    }

    standings
}
