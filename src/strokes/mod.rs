//! Handicap stroke allocation (the Creecher Feature) and course data.

pub mod allocator;
pub mod course;

pub use allocator::{allocate_strokes, StrokeAllocation};
pub use course::{Course, CourseHole};
