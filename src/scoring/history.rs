//! The hole-by-hole ledger.
//!
//! `HoleHistory` is the single source of truth for the round: standings
//! are always re-folded from it, never patched. Records are appended on
//! submit and replaced in place on edit; they are never deleted.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{BettingEvent, PlayerId, PlayerMap};
use crate::rotation::Phase;
use crate::teams::{AardvarkState, TeamAssignment};
use crate::wager::PayoutRatio;

use super::validator::ZERO_SUM_TOLERANCE;

/// Everything a completed hole leaves behind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoleRecord {
    pub hole: u8,
    pub teams: TeamAssignment,
    pub aardvark: Option<AardvarkState>,
    pub invisible_aardvark_tossed: bool,
    /// Gross scores as entered; conceded holes may leave gaps.
    pub gross_scores: PlayerMap<Option<u32>>,
    /// Quarters transferred this hole. Sums to zero within tolerance.
    pub points_delta: PlayerMap<f64>,
    pub wager: u32,
    pub payout_ratio: PayoutRatio,
    pub phase: Phase,
    pub rotation_order: Vec<PlayerId>,
    pub captain_index: usize,
    pub events: Vec<BettingEvent>,
}

impl HoleRecord {
    /// A hole where nobody moved: every delta is zero. Feeds carry-over.
    #[must_use]
    pub fn is_fully_tied(&self) -> bool {
        self.points_delta
            .iter()
            .all(|(_, d)| d.abs() <= ZERO_SUM_TOLERANCE)
    }
}

/// Append/edit-in-place ledger of completed holes.
///
/// Backed by a persistent vector so snapshots share structure with the
/// live ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoleHistory {
    records: Vector<HoleRecord>,
}

impl HoleHistory {
    /// Number of recorded holes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a hole.
    #[must_use]
    pub fn get(&self, hole: u8) -> Option<&HoleRecord> {
        self.records.iter().find(|r| r.hole == hole)
    }

    /// Append a record, or replace in place if the hole was already
    /// recorded (edit mode). Records are never deleted.
    pub fn submit(&mut self, record: HoleRecord) {
        if let Some(pos) = self.records.iter().position(|r| r.hole == record.hole) {
            log::debug!("replacing record for hole {}", record.hole);
            self.records.set(pos, record);
        } else {
            self.records.push_back(record);
        }
    }

    /// Iterate records in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &HoleRecord> {
        self.records.iter()
    }

    /// True once every hole of the round is recorded.
    #[must_use]
    pub fn is_round_complete(&self, hole_count: u8) -> bool {
        (1..=hole_count).all(|h| self.get(h).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hole: u8, deltas: &[f64]) -> HoleRecord {
        HoleRecord {
            hole,
            teams: TeamAssignment::default(),
            aardvark: None,
            invisible_aardvark_tossed: false,
            gross_scores: PlayerMap::with_value(deltas.len(), None),
            points_delta: PlayerMap::new(deltas.len(), |p| deltas[p.index()]),
            wager: 1,
            payout_ratio: PayoutRatio::EvenMoney,
            phase: Phase::Normal,
            rotation_order: PlayerId::all(deltas.len()).collect(),
            captain_index: 0,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_submit_appends() {
        let mut history = HoleHistory::default();
        history.submit(record(1, &[1.0, -1.0, 0.0, 0.0]));
        history.submit(record(2, &[0.0, 0.0, 2.0, -2.0]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(2).unwrap().points_delta[PlayerId::new(2)], 2.0);
    }

    #[test]
    fn test_submit_replaces_in_place() {
        let mut history = HoleHistory::default();
        history.submit(record(1, &[1.0, -1.0, 0.0, 0.0]));
        history.submit(record(2, &[0.0, 0.0, 2.0, -2.0]));
        history.submit(record(1, &[2.0, -2.0, 0.0, 0.0]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1).unwrap().points_delta[PlayerId::new(0)], 2.0);
        // Order preserved: hole 1 still first.
        assert_eq!(history.iter().next().unwrap().hole, 1);
    }

    #[test]
    fn test_fully_tied_detection() {
        assert!(record(1, &[0.0, 0.0, 0.0, 0.0]).is_fully_tied());
        assert!(!record(1, &[1.0, -1.0, 0.0, 0.0]).is_fully_tied());
    }

    #[test]
    fn test_round_completion() {
        let mut history = HoleHistory::default();
        for hole in 1..=17 {
            history.submit(record(hole, &[0.0, 0.0, 0.0, 0.0]));
        }
        assert!(!history.is_round_complete(18));

        history.submit(record(18, &[0.0, 0.0, 0.0, 0.0]));
        assert!(history.is_round_complete(18));
    }
}
