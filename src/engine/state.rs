//! The round's authoritative state.
//!
//! Exactly one logical actor drives a round, one action at a time, so all
//! of this is plain single-threaded mutation. Hole-scoped pieces (teams,
//! wager, offer, scores, events) reset when a hole begins; the ledger,
//! standings, float bookkeeping, and warnings live for the round.

use serde::Serialize;

use crate::core::{
    BetEventKind, BettingEvent, GameConfig, Player, PlayerId, PlayerMap, Roster,
};
use crate::rotation::{Phase, RotationState};
use crate::scoring::{fold_standings, HoleHistory, PlayerStanding};
use crate::strokes::{allocate_strokes, Course, StrokeAllocation};
use crate::teams::{AardvarkState, TeamFormation};
use crate::wager::{BettingOffer, OfferProtocol, WagerState};

use super::persistence::{StoreCommand, Warning, WarningSource};

/// The rules engine: all round state plus the action dispatch surface.
pub struct RuleEngine {
    pub(super) config: GameConfig,
    pub(super) roster: Roster,
    pub(super) course: Course,
    pub(super) allocation: StrokeAllocation,

    // Hole-scoped.
    pub(super) rotation: RotationState,
    pub(super) formation: TeamFormation,
    pub(super) aardvark: Option<AardvarkState>,
    pub(super) invisible_aardvark_tossed: bool,
    pub(super) wager: WagerState,
    pub(super) offers: OfferProtocol,
    pub(super) gross_scores: PlayerMap<Option<u32>>,
    pub(super) events: Vec<BettingEvent>,

    // Round-scoped.
    pub(super) current_hole: u8,
    pub(super) editing: bool,
    pub(super) history: HoleHistory,
    pub(super) standings: PlayerMap<PlayerStanding>,
    pub(super) float_used: PlayerMap<bool>,
    pub(super) option_enabled: bool,
    pub(super) warnings: Vec<Warning>,
    pub(super) pending_commands: Vec<StoreCommand>,
}

/// Betting view bundled into the snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct BettingView {
    pub wager: WagerState,
    pub pending_offer: Option<BettingOffer>,
    pub events: Vec<BettingEvent>,
}

/// Full state snapshot returned from every dispatched action.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub hole: u8,
    pub phase: Phase,
    pub rotation: RotationState,
    pub teams: TeamFormation,
    pub aardvark: Option<AardvarkState>,
    pub invisible_aardvark_tossed: bool,
    pub betting: BettingView,
    pub standings: PlayerMap<PlayerStanding>,
    pub history: HoleHistory,
    pub warnings: Vec<Warning>,
}

impl RuleEngine {
    /// Set up a round: allocate strokes, build the opening rotation, and
    /// open hole 1.
    #[must_use]
    pub fn new(config: GameConfig, players: Vec<Player>, course: Course) -> Self {
        let roster = Roster::from_players(players);
        assert_eq!(
            roster.player_count(),
            config.player_count,
            "roster size must match configuration"
        );

        let allocation = allocate_strokes(&roster, &course);
        let mut warnings = Vec::new();
        if !allocation.missing_holes.is_empty() {
            warnings.push(Warning::new(
                WarningSource::CourseData,
                format!(
                    "no stroke index for holes {:?}; no strokes allocated there",
                    allocation.missing_holes
                ),
            ));
        }

        let n = config.player_count;
        let rotation = RotationState::new(&roster);
        let wager = WagerState::new(config.base_wager);

        let mut engine = Self {
            roster,
            course,
            allocation,
            rotation,
            formation: TeamFormation::default(),
            aardvark: None,
            invisible_aardvark_tossed: false,
            wager,
            offers: OfferProtocol::default(),
            gross_scores: PlayerMap::with_value(n, None),
            events: Vec::new(),
            current_hole: 1,
            editing: false,
            history: HoleHistory::default(),
            standings: PlayerMap::with_default(n),
            float_used: PlayerMap::with_value(n, false),
            option_enabled: true,
            warnings,
            pending_commands: Vec::new(),
            config,
        };
        engine.begin_hole();
        engine
    }

    /// Open the current hole: detect phase, pick the goat on Hoepfinger
    /// entry, compose the opening wager, and reset hole-scoped state.
    pub(super) fn begin_hole(&mut self) {
        let n = self.config.player_count;

        let entering_hoepfinger = self
            .rotation
            .set_phase_for_hole(n, self.current_hole);
        if self.rotation.phase == Phase::Hoepfinger {
            // The goat is re-derived every Hoepfinger hole; standings move.
            let goat =
                RotationState::pick_goat(&self.standings, &self.roster, self.config.goat_tie_break);
            self.rotation.goat = Some(goat);
            if entering_hoepfinger {
                log::debug!(
                    "entering Hoepfinger on hole {}, goat is {goat}",
                    self.current_hole
                );
            }
        }

        self.formation = TeamFormation::default();
        self.aardvark = (n >= 5).then(AardvarkState::default);
        self.invisible_aardvark_tossed = false;
        self.offers.reset();
        self.gross_scores = PlayerMap::with_value(n, None);
        self.events.clear();
        self.editing = false;

        self.compose_opening_wager();
    }

    /// Compose the hole-opening wager and emit its events. Re-run when the
    /// goat re-seats the rotation before play.
    pub(super) fn compose_opening_wager(&mut self) {
        self.events.clear();
        let option_applies = self.option_applies();
        let carried = self.wager.carry_over;

        self.wager
            .start_hole(self.rotation.phase, option_applies, &self.config);

        if carried {
            self.events.push(BettingEvent::new(
                BetEventKind::CarryOver,
                None,
                self.wager.next_hole_wager,
                self.wager.current_wager,
            ));
        }
        if option_applies {
            self.events.push(BettingEvent::new(
                BetEventKind::OptionOn,
                Some(self.rotation.captain()),
                self.wager.next_hole_wager,
                self.wager.current_wager,
            ));
        }
    }

    /// The option applies when the captain is also the player furthest
    /// behind. No history yet means nobody is behind.
    fn option_applies(&self) -> bool {
        if !self.option_enabled || self.history.is_empty() {
            return false;
        }
        let goat =
            RotationState::pick_goat(&self.standings, &self.roster, self.config.goat_tie_break);
        goat == self.rotation.captain()
    }

    /// Re-fold standings from the full ledger.
    pub(super) fn refold_standings(&mut self) {
        self.standings = fold_standings(&self.history, self.config.player_count);
    }

    // === Read surface ===

    /// The round configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current hole number.
    #[must_use]
    pub fn current_hole(&self) -> u8 {
        self.current_hole
    }

    /// The current captain.
    #[must_use]
    pub fn captain(&self) -> PlayerId {
        self.rotation.captain()
    }

    /// Stroke credit for a player on a hole (Creecher allocation).
    #[must_use]
    pub fn stroke_credit(&self, player: PlayerId, hole: u8) -> f64 {
        self.allocation.credit(player, hole)
    }

    /// Cumulative standings, as of the last fold.
    #[must_use]
    pub fn standings(&self) -> &PlayerMap<PlayerStanding> {
        &self.standings
    }

    /// The hole ledger.
    #[must_use]
    pub fn history(&self) -> &HoleHistory {
        &self.history
    }

    /// The course in play.
    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Drain queued store commands for the caller to execute.
    pub fn take_pending_commands(&mut self) -> Vec<StoreCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Report that an executed store command failed. Attaches a warning;
    /// local state stays as-is.
    pub fn report_store_failures(&mut self, warnings: Vec<Warning>) {
        self.warnings.extend(warnings);
    }

    /// Build the full state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hole: self.current_hole,
            phase: self.rotation.phase,
            rotation: self.rotation.clone(),
            teams: self.formation.clone(),
            aardvark: self.aardvark.clone(),
            invisible_aardvark_tossed: self.invisible_aardvark_tossed,
            betting: BettingView {
                wager: self.wager.clone(),
                pending_offer: self.offers.pending().cloned(),
                events: self.events.clone(),
            },
            standings: self.standings.clone(),
            history: self.history.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn players(n: u8) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), 10.0 + f64::from(i)))
            .collect()
    }

    #[test]
    fn test_new_round_opens_hole_one() {
        let engine = RuleEngine::new(GameConfig::new(4), players(4), Course::flat(18));

        assert_eq!(engine.current_hole(), 1);
        assert_eq!(engine.captain(), PlayerId::new(0));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, Phase::Normal);
        assert_eq!(snapshot.betting.wager.current_wager, 1);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn test_five_player_round_gets_aardvark_state() {
        let engine = RuleEngine::new(GameConfig::new(5), players(5), Course::flat(18));
        assert!(engine.snapshot().aardvark.is_some());

        let engine = RuleEngine::new(GameConfig::new(4), players(4), Course::flat(18));
        assert!(engine.snapshot().aardvark.is_none());
    }

    #[test]
    fn test_incomplete_course_warns_at_setup() {
        use crate::strokes::CourseHole;

        let mut holes: Vec<CourseHole> =
            (1..=17).map(|h| CourseHole::new(h, 4, h, 400)).collect();
        holes.push(CourseHole {
            hole_number: 18,
            par: 4,
            stroke_index: None,
            yards: 400,
        });

        let engine = RuleEngine::new(GameConfig::new(4), players(4), Course::new(holes));
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.warnings[0].source, WarningSource::CourseData);
    }

    #[test]
    fn test_no_option_on_hole_one() {
        let engine = RuleEngine::new(GameConfig::new(4), players(4), Course::flat(18));
        assert!(!engine.snapshot().betting.wager.option_active);
    }
}
