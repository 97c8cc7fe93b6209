//! The Creecher Feature: half-stroke handicap allocation.
//!
//! Strokes are allocated per player against the field's low man, in
//! half-stroke credits spread across holes by difficulty:
//!
//! 1. net = handicap - min(handicap) over the field.
//! 2. net <= 6: the net-many hardest holes get 0.5 each.
//! 3. 6 < net <= 18: the net-many hardest holes get a stroke, except the
//!    easiest 6 of that set get 0.5 instead of 1.0.
//! 4. net > 18: the hardest 12 get 1.0 and the easiest 6 get 0.5; each
//!    whole stroke past 18 adds a 0.5 increment, filling the hardest 12 to
//!    1.5 before spilling to the easiest 6, capped at 2.0 per hole.
//!
//! A fractional net of .5 or more adds one extra 0.5 to the next hole in
//! difficulty order. Holes without stroke-index data allocate zero for
//! everyone and are reported, not hidden.

use rustc_hash::FxHashMap;

use crate::core::{PlayerId, PlayerMap, Roster};

use super::course::Course;

/// Per-player, per-hole stroke credits for the round.
#[derive(Clone, Debug)]
pub struct StrokeAllocation {
    credits: PlayerMap<FxHashMap<u8, f64>>,
    /// Holes that allocated zero because their stroke index is missing.
    pub missing_holes: Vec<u8>,
}

impl StrokeAllocation {
    /// Stroke credit for a player on a hole. Zero for holes with no data.
    #[must_use]
    pub fn credit(&self, player: PlayerId, hole_number: u8) -> f64 {
        self.credits[player]
            .get(&hole_number)
            .copied()
            .unwrap_or(0.0)
    }

    /// Net score for a player: gross minus stroke credit.
    #[must_use]
    pub fn net(&self, player: PlayerId, hole_number: u8, gross: u32) -> f64 {
        f64::from(gross) - self.credit(player, hole_number)
    }
}

/// Allocate stroke credits for the whole field.
#[must_use]
pub fn allocate_strokes(roster: &Roster, course: &Course) -> StrokeAllocation {
    let low_man = roster.min_handicap();
    let by_difficulty = course.holes_by_difficulty();
    let missing = course.missing_stroke_indexes();

    if !missing.is_empty() {
        log::warn!("course data incomplete, no strokes on holes {missing:?}");
    }

    let credits = PlayerMap::new(roster.player_count(), |player| {
        let net = roster[player].handicap - low_man;
        let per_rank = creecher_credits(net, by_difficulty.len());

        by_difficulty
            .iter()
            .zip(per_rank)
            .map(|(&hole, credit)| (hole, credit))
            .collect()
    });

    StrokeAllocation {
        credits,
        missing_holes: missing,
    }
}

/// Credits by difficulty rank (0 = hardest) for one net handicap.
fn creecher_credits(net: f64, hole_count: usize) -> Vec<f64> {
    let mut credits = vec![0.0; hole_count];
    if net <= 0.0 || hole_count == 0 {
        return credits;
    }

    let whole = net.floor() as usize;
    let half_extra = net.fract() >= 0.5;

    if net <= 18.0 {
        let allocated = whole.min(hole_count);
        // Within the allocated set, the easiest 6 carry half strokes; for
        // net <= 6 the set is at most 6 holes, so everything is a half.
        let full_cutoff = allocated.saturating_sub(6);
        for (rank, credit) in credits.iter_mut().enumerate().take(allocated) {
            *credit = if rank < full_cutoff { 1.0 } else { 0.5 };
        }
        if half_extra && allocated < hole_count {
            credits[allocated] = 0.5;
        }
        return credits;
    }

    // net > 18: full base allocation, then 0.5 increments hardest-first.
    let hard = hole_count.min(12);
    for (rank, credit) in credits.iter_mut().enumerate() {
        *credit = if rank < hard { 1.0 } else { 0.5 };
    }

    let mut increments = whole - 18 + usize::from(half_extra);
    let fill_passes: [(std::ops::Range<usize>, f64); 5] = [
        (0..hard, 1.5),
        (hard..hole_count, 1.0),
        (0..hard, 2.0),
        (hard..hole_count, 1.5),
        (hard..hole_count, 2.0),
    ];
    'fill: for (range, ceiling) in fill_passes {
        for rank in range {
            if increments == 0 {
                break 'fill;
            }
            if credits[rank] < ceiling {
                credits[rank] += 0.5;
                increments -= 1;
            }
        }
    }

    credits
}
