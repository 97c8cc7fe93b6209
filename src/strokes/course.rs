//! Course reference data.
//!
//! Supplied by an external course-data collaborator before the round. A
//! hole's stroke index ranks its difficulty 1-18 (1 = hardest); the
//! allocator orders holes by it. Incomplete stroke-index data is legal
//! input: affected holes allocate zero and are surfaced as a warning.

use serde::{Deserialize, Serialize};

/// One hole of course data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseHole {
    pub hole_number: u8,
    pub par: u8,
    /// Stroke index 1-18, 1 hardest. `None` when the course data is
    /// incomplete for this hole.
    pub stroke_index: Option<u8>,
    pub yards: u32,
}

impl CourseHole {
    /// Create a hole with full data.
    #[must_use]
    pub fn new(hole_number: u8, par: u8, stroke_index: u8, yards: u32) -> Self {
        Self {
            hole_number,
            par,
            stroke_index: Some(stroke_index),
            yards,
        }
    }
}

/// An 18-hole course table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    holes: Vec<CourseHole>,
}

impl Course {
    /// Build a course from hole data, sorted by hole number.
    #[must_use]
    pub fn new(mut holes: Vec<CourseHole>) -> Self {
        holes.sort_by_key(|h| h.hole_number);
        Self { holes }
    }

    /// A flat par-72-style course with stroke index equal to hole number.
    /// Handy for tests and for play before real course data arrives.
    #[must_use]
    pub fn flat(hole_count: u8) -> Self {
        Self::new(
            (1..=hole_count)
                .map(|n| CourseHole::new(n, 4, n, 400))
                .collect(),
        )
    }

    /// All holes, in hole-number order.
    #[must_use]
    pub fn holes(&self) -> &[CourseHole] {
        &self.holes
    }

    /// Look up a hole by number.
    #[must_use]
    pub fn hole(&self, number: u8) -> Option<&CourseHole> {
        self.holes.iter().find(|h| h.hole_number == number)
    }

    /// Hole numbers ordered hardest-first. Holes without a stroke index
    /// are excluded.
    #[must_use]
    pub fn holes_by_difficulty(&self) -> Vec<u8> {
        let mut indexed: Vec<(u8, u8)> = self
            .holes
            .iter()
            .filter_map(|h| h.stroke_index.map(|si| (si, h.hole_number)))
            .collect();
        indexed.sort();
        indexed.into_iter().map(|(_, n)| n).collect()
    }

    /// Hole numbers with no stroke index.
    #[must_use]
    pub fn missing_stroke_indexes(&self) -> Vec<u8> {
        self.holes
            .iter()
            .filter(|h| h.stroke_index.is_none())
            .map(|h| h.hole_number)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_course() {
        let course = Course::flat(18);
        assert_eq!(course.holes().len(), 18);
        assert_eq!(course.hole(7).unwrap().stroke_index, Some(7));
        assert!(course.missing_stroke_indexes().is_empty());
    }

    #[test]
    fn test_difficulty_order_follows_stroke_index() {
        let course = Course::new(vec![
            CourseHole::new(1, 4, 9, 390),
            CourseHole::new(2, 5, 1, 540),
            CourseHole::new(3, 3, 17, 160),
        ]);

        assert_eq!(course.holes_by_difficulty(), vec![2, 1, 3]);
    }

    #[test]
    fn test_missing_stroke_index_surfaces() {
        let mut holes: Vec<CourseHole> =
            (1..=17).map(|n| CourseHole::new(n, 4, n, 400)).collect();
        holes.push(CourseHole {
            hole_number: 18,
            par: 4,
            stroke_index: None,
            yards: 410,
        });

        let course = Course::new(holes);
        assert_eq!(course.missing_stroke_indexes(), vec![18]);
        assert_eq!(course.holes_by_difficulty().len(), 17);
    }
}
