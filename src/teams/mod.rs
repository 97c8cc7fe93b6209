//! Team formation: partners, solo, and the aardvark variants.

pub mod aardvark;
pub mod formation;

pub use aardvark::AardvarkState;
pub use formation::{Side, TeamAssignment, TeamFormation, TeamSide};
