//! Round configuration.
//!
//! Course rules differ between groups, so everything a home game might
//! argue about is a field here rather than a constant: the base wager,
//! how far carry-overs may compound, what a declined double means, and
//! how a goat tie is broken entering Hoepfinger.

use serde::{Deserialize, Serialize};

/// What happens when a double is declined.
///
/// The two policies seen in the wild; neither is assumed silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclinedDoublePolicy {
    /// The declining side forfeits the hole at the pre-double stake.
    #[default]
    ForfeitAtCurrentWager,
    /// The escalation dies; the hole plays on at the current wager.
    CancelOnly,
}

/// Tie-break when several players share the lowest standing entering
/// Hoepfinger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoatTieBreak {
    /// Earliest tee order wins the goat; falls back to lowest seat.
    #[default]
    EarliestTeeOrder,
    /// Lowest seat index wins the goat.
    LowestSeat,
}

/// Complete round configuration.
///
/// Built once at round start and never mutated.
///
/// ## Example
///
/// ```
/// use wolf_goat_pig::core::GameConfig;
///
/// let config = GameConfig::new(4)
///     .with_base_wager(2)
///     .with_carry_over_cap(1);
///
/// assert_eq!(config.player_count, 4);
/// assert_eq!(config.base_wager, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (4-6 for a standard game).
    pub player_count: usize,

    /// Opening wager per hole, in quarters.
    pub base_wager: u32,

    /// Maximum consecutive carry-over doublings. A fully tied hole doubles
    /// the next hole's wager; this caps how many ties in a row may compound.
    pub carry_over_cap: u32,

    /// Whether a declined double forfeits the hole or just cancels.
    pub declined_double_policy: DeclinedDoublePolicy,

    /// Goat selection tie-break entering Hoepfinger.
    pub goat_tie_break: GoatTieBreak,

    /// Opening wagers the goat may pick for Joe's Special, in quarters.
    pub joes_special_menu: Vec<u32>,

    /// Number of holes in the round.
    pub hole_count: u8,
}

impl GameConfig {
    /// Create a configuration with standard course rules.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(
            (4..=6).contains(&player_count),
            "Wolf Goat Pig runs 4-6 players"
        );

        Self {
            player_count,
            base_wager: 1,
            carry_over_cap: 1,
            declined_double_policy: DeclinedDoublePolicy::default(),
            goat_tie_break: GoatTieBreak::default(),
            joes_special_menu: vec![2, 4, 8],
            hole_count: 18,
        }
    }

    /// Set the base wager.
    #[must_use]
    pub fn with_base_wager(mut self, quarters: u32) -> Self {
        assert!(quarters > 0, "base wager must be positive");
        self.base_wager = quarters;
        self
    }

    /// Set the carry-over cap.
    #[must_use]
    pub fn with_carry_over_cap(mut self, cap: u32) -> Self {
        self.carry_over_cap = cap;
        self
    }

    /// Set the declined-double policy.
    #[must_use]
    pub fn with_declined_double_policy(mut self, policy: DeclinedDoublePolicy) -> Self {
        self.declined_double_policy = policy;
        self
    }

    /// Set the goat tie-break rule.
    #[must_use]
    pub fn with_goat_tie_break(mut self, rule: GoatTieBreak) -> Self {
        self.goat_tie_break = rule;
        self
    }

    /// Set the Joe's Special menu.
    #[must_use]
    pub fn with_joes_special_menu(mut self, menu: Vec<u32>) -> Self {
        assert!(!menu.is_empty(), "menu must offer at least one wager");
        self.joes_special_menu = menu;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GameConfig::new(4);

        assert_eq!(config.base_wager, 1);
        assert_eq!(config.carry_over_cap, 1);
        assert_eq!(
            config.declined_double_policy,
            DeclinedDoublePolicy::ForfeitAtCurrentWager
        );
        assert_eq!(config.joes_special_menu, vec![2, 4, 8]);
        assert_eq!(config.hole_count, 18);
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new(5)
            .with_base_wager(2)
            .with_carry_over_cap(2)
            .with_declined_double_policy(DeclinedDoublePolicy::CancelOnly)
            .with_goat_tie_break(GoatTieBreak::LowestSeat)
            .with_joes_special_menu(vec![4, 8]);

        assert_eq!(config.player_count, 5);
        assert_eq!(config.base_wager, 2);
        assert_eq!(config.carry_over_cap, 2);
        assert_eq!(config.declined_double_policy, DeclinedDoublePolicy::CancelOnly);
        assert_eq!(config.goat_tie_break, GoatTieBreak::LowestSeat);
        assert_eq!(config.joes_special_menu, vec![4, 8]);
    }

    #[test]
    #[should_panic(expected = "Wolf Goat Pig runs 4-6 players")]
    fn test_config_rejects_three_players() {
        GameConfig::new(3);
    }
}
