//! Action dispatch: the engine's single entry point.
//!
//! Every user action funnels through [`RuleEngine::apply`], an exhaustive
//! match over the closed [`Action`] union. There is no default branch;
//! an action the engine does not recognize cannot be constructed, and one
//! arriving as text fails parsing with a reported error. Each successful
//! action returns the full updated [`Snapshot`].

use crate::core::{Action, BetEventKind, BettingEvent, PlayerId, PlayerMap, QuartersEntry};
use crate::core::DeclinedDoublePolicy;
use crate::error::{EngineError, EngineResult};
use crate::rotation::Phase;
use crate::scoring::{validate_quarters, HoleRecord};
use crate::teams::{TeamAssignment, TeamSide};
use crate::wager::PayoutRatio;

use super::persistence::StoreCommand;
use super::state::{RuleEngine, Snapshot};

impl RuleEngine {
    /// Apply one action and return the updated state snapshot.
    pub fn apply(&mut self, action: Action) -> EngineResult<Snapshot> {
        log::debug!("apply {} on hole {}", action.name(), self.current_hole);
        self.dispatch(action)?;
        Ok(self.snapshot())
    }

    /// Parse and apply an action arriving as an external JSON payload.
    pub fn apply_json(&mut self, payload: &str) -> EngineResult<Snapshot> {
        self.apply(Action::from_json(payload)?)
    }

    fn dispatch(&mut self, action: Action) -> EngineResult<()> {
        match action {
            Action::SetCurrentHole { hole } => self.set_current_hole(hole),
            Action::NextHole => self.next_hole(),
            Action::LoadHoleForEdit { hole } => self.load_hole_for_edit(hole),

            Action::UpdateScore { player, gross } => self.update_score(player, gross),
            Action::SetScores { scores } => {
                for entry in scores {
                    self.update_score(entry.player, entry.gross)?;
                }
                Ok(())
            }
            Action::SubmitHole { quarters } => self.submit_hole(&quarters),
            Action::ConcedeHole { team } => self.concede_hole(team),

            Action::TogglePlayerTeam { player } => {
                self.check_player(player)?;
                self.formation.toggle_team1_member(player);
                Ok(())
            }
            Action::SetCaptain { player } => {
                self.check_player(player)?;
                self.formation.set_solo_captain(player);
                Ok(())
            }
            Action::GoSolo => self.go_solo(),
            Action::RequestPartner { partner } => {
                self.check_player(partner)?;
                self.formation
                    .request_partner(self.rotation.captain(), partner)
            }
            Action::AcceptPartner => {
                self.formation
                    .accept_partner(self.rotation.captain())
                    .map(|_| ())
            }
            Action::DeclinePartner => self.decline_partner(),

            Action::RequestAardvarkTeam { team } => {
                self.aardvark_mut("request_aardvark_team")?.request_team(team)
            }
            Action::TossAardvark => self.toss_aardvark(),
            Action::InvokeTunkarri => self.invoke_tunkarri(),
            Action::TossInvisibleAardvark => self.toss_invisible_aardvark(),

            Action::OfferDouble { by } => self.offer_double(by),
            Action::AcceptDouble => self.accept_double(),
            Action::DeclineDouble => self.decline_double(),
            Action::InvokeFloat { by } => self.invoke_float(by),
            Action::ToggleOption => {
                self.option_enabled = !self.option_enabled;
                Ok(())
            }
            Action::TurnOffOption => self.turn_off_option(),
            Action::AnnounceDuncan => self.announce_duncan(),
            Action::InvokeJoesSpecial { wager } => self.invoke_joes_special(wager),

            Action::SelectGoatPosition { index } => self.select_goat_position(index),
        }
    }

    // === Hole lifecycle ===

    fn set_current_hole(&mut self, hole: u8) -> EngineResult<()> {
        if hole == 0 || hole > self.config.hole_count {
            return Err(EngineError::NoSuchHole { hole });
        }
        self.current_hole = hole;
        self.begin_hole();
        Ok(())
    }

    fn next_hole(&mut self) -> EngineResult<()> {
        if self.current_hole >= self.config.hole_count {
            return Err(EngineError::IllegalAction {
                action: "next_hole".into(),
                reason: "the round is over".into(),
            });
        }

        self.current_hole += 1;
        let next_phase = crate::rotation::detect_phase(self.config.player_count, self.current_hole);
        if next_phase != Phase::Hoepfinger {
            // In Hoepfinger the goat seats the order and captaincy resets.
            self.rotation.advance_captain();
        }
        self.begin_hole();
        Ok(())
    }

    fn load_hole_for_edit(&mut self, hole: u8) -> EngineResult<()> {
        let record = self
            .history
            .get(hole)
            .ok_or(EngineError::NoSuchHole { hole })?
            .clone();

        self.current_hole = hole;
        self.editing = true;
        self.formation.assignment = record.teams;
        self.formation.pending_partner = None;
        self.aardvark = record.aardvark;
        self.invisible_aardvark_tossed = record.invisible_aardvark_tossed;
        self.gross_scores = record.gross_scores;
        self.events = record.events;
        self.offers.reset();
        self.rotation.order = record.rotation_order;
        self.rotation.captain_index = record.captain_index;
        self.rotation.phase = record.phase;
        // Carry-over bookkeeping belongs to the live hole; an edit only
        // restores the stake and terms as played.
        self.wager.set_current(record.wager);
        self.wager.payout_ratio = record.payout_ratio;
        Ok(())
    }

    // === Scores & submission ===

    fn update_score(&mut self, player: PlayerId, gross: u32) -> EngineResult<()> {
        self.check_player(player)?;
        self.gross_scores[player] = Some(gross);
        Ok(())
    }

    fn submit_hole(&mut self, quarters: &[QuartersEntry]) -> EngineResult<()> {
        let deltas = validate_quarters(quarters, self.config.player_count)?;
        self.finalize_hole(deltas);
        Ok(())
    }

    fn concede_hole(&mut self, conceding: TeamSide) -> EngineResult<()> {
        let deltas = self.concession_deltas(conceding)?;
        self.finalize_hole(deltas);
        Ok(())
    }

    /// Quarters when a side gives up the hole: each conceding player pays
    /// the stake (scaled by the payout terms) and the other side splits
    /// the pot.
    fn concession_deltas(&self, conceding: TeamSide) -> EngineResult<PlayerMap<f64>> {
        let n = self.config.player_count;
        if !self.formation.assignment.is_playable(n) {
            return Err(EngineError::InvalidTeams {
                reason: "teams are not formed".into(),
            });
        }

        let losers = self.formation.assignment.members(conceding, n);
        let winners = self.formation.assignment.members(conceding.other(), n);
        let payment = f64::from(self.wager.current_wager) * self.wager.payout_ratio.multiplier();
        let share = payment * losers.len() as f64 / winners.len() as f64;

        Ok(PlayerMap::new(n, |p| {
            if losers.contains(&p) {
                -payment
            } else {
                share
            }
        }))
    }

    /// Record the hole: build the record, update carry-over, append to the
    /// ledger, re-fold standings, and queue persistence.
    fn finalize_hole(&mut self, deltas: PlayerMap<f64>) {
        let record = HoleRecord {
            hole: self.current_hole,
            teams: self.formation.assignment.clone(),
            aardvark: self.aardvark.clone(),
            invisible_aardvark_tossed: self.invisible_aardvark_tossed,
            gross_scores: self.gross_scores.clone(),
            points_delta: deltas.clone(),
            wager: self.wager.current_wager,
            payout_ratio: self.wager.payout_ratio,
            phase: self.rotation.phase,
            rotation_order: self.rotation.order.clone(),
            captain_index: self.rotation.captain_index,
            events: self.events.clone(),
        };

        if !self.editing {
            self.wager.record_outcome(record.is_fully_tied());
        }
        self.editing = false;

        self.history.submit(record.clone());
        self.refold_standings();

        self.pending_commands.push(StoreCommand::SaveHole {
            hole: record.hole,
            quarters: deltas,
            details: Box::new(record),
        });
        self.pending_commands.push(StoreCommand::CheckAchievements {
            players: PlayerId::all(self.config.player_count).collect(),
        });
        if self.history.is_round_complete(self.config.hole_count) {
            self.pending_commands.push(StoreCommand::MarkComplete);
        }
    }

    // === Team formation ===

    fn go_solo(&mut self) -> EngineResult<()> {
        let captain = self.rotation.captain();
        self.formation.set_solo_captain(captain);

        let before = self.wager.current_wager;
        self.wager.double();
        self.push_event(BetEventKind::SoloPig, Some(captain), before);
        Ok(())
    }

    fn decline_partner(&mut self) -> EngineResult<()> {
        let captain = self.rotation.captain();
        self.formation.decline_partner(captain)?;

        // A refused captain plays the hole alone for double the stake.
        let before = self.wager.current_wager;
        self.wager.double();
        self.push_event(BetEventKind::SoloPig, Some(captain), before);
        Ok(())
    }

    // === Aardvark ===

    fn aardvark_mut(&mut self, action: &str) -> EngineResult<&mut crate::teams::AardvarkState> {
        self.aardvark
            .as_mut()
            .ok_or_else(|| EngineError::IllegalAction {
                action: action.into(),
                reason: "no aardvark in a 4-player game".into(),
            })
    }

    /// The aardvark hits last.
    fn aardvark_player(&self) -> PlayerId {
        *self.rotation.order.last().expect("rotation is never empty")
    }

    fn toss_aardvark(&mut self) -> EngineResult<()> {
        let landed = self.aardvark_mut("toss_aardvark")?.toss()?;
        let pig = self.aardvark_player();

        // Keep the stored side consistent with where the aardvark landed;
        // the complement follows automatically.
        let n = self.config.player_count;
        let on_team1 = self
            .formation
            .assignment
            .side_of(pig, n)
            == TeamSide::Team1;
        if (landed == TeamSide::Team1) != on_team1 {
            self.formation.toggle_team1_member(pig);
        }

        let before = self.wager.current_wager;
        self.wager.double();
        self.push_event(BetEventKind::AardvarkTossed, Some(pig), before);
        Ok(())
    }

    fn invoke_tunkarri(&mut self) -> EngineResult<()> {
        let pig = self.aardvark_player();
        self.aardvark_mut("invoke_tunkarri")?.invoke_tunkarri(pig)?;

        self.wager.payout_ratio = PayoutRatio::ThreeForTwo;
        let stake = self.wager.current_wager;
        self.push_event(BetEventKind::Tunkarri, Some(pig), stake);
        Ok(())
    }

    fn toss_invisible_aardvark(&mut self) -> EngineResult<()> {
        if self.config.player_count != 4 {
            return Err(EngineError::IllegalAction {
                action: "toss_invisible_aardvark".into(),
                reason: "only 4-player games carry the invisible aardvark".into(),
            });
        }
        if self.invisible_aardvark_tossed {
            return Err(EngineError::IllegalAction {
                action: "toss_invisible_aardvark".into(),
                reason: "already tossed".into(),
            });
        }

        self.invisible_aardvark_tossed = true;
        let before = self.wager.current_wager;
        self.wager.double();
        self.wager.payout_ratio = PayoutRatio::ThreeForTwo;
        self.push_event(BetEventKind::InvisibleAardvarkTossed, None, before);
        Ok(())
    }

    // === Betting ===

    fn offer_double(&mut self, by: PlayerId) -> EngineResult<()> {
        self.check_player(by)?;
        let offer = self.offers.offer_double(by, self.wager.current_wager)?;
        let (before, after) = (offer.wager_before, offer.wager_after);

        self.events.push(BettingEvent::new(
            BetEventKind::DoubleOffered,
            Some(by),
            before,
            after,
        ));
        Ok(())
    }

    fn accept_double(&mut self) -> EngineResult<()> {
        let offer = self.offers.accept()?;
        self.wager.set_current(offer.wager_after);
        self.events.push(BettingEvent::new(
            BetEventKind::DoubleAccepted,
            Some(offer.offered_by),
            offer.wager_before,
            offer.wager_after,
        ));
        Ok(())
    }

    fn decline_double(&mut self) -> EngineResult<()> {
        let offer = self.offers.decline()?;
        self.events.push(BettingEvent::new(
            BetEventKind::DoubleDeclined,
            Some(offer.offered_by),
            offer.wager_before,
            offer.wager_before,
        ));

        match self.config.declined_double_policy {
            DeclinedDoublePolicy::CancelOnly => Ok(()),
            DeclinedDoublePolicy::ForfeitAtCurrentWager => {
                let n = self.config.player_count;
                if !self.formation.assignment.is_playable(n) {
                    // Nothing to forfeit against; the escalation just dies.
                    log::debug!("declined double with no teams formed, treating as cancel");
                    return Ok(());
                }
                let conceding = self
                    .formation
                    .assignment
                    .side_of(offer.offered_by, n)
                    .other();
                let deltas = self.concession_deltas(conceding)?;
                self.finalize_hole(deltas);
                Ok(())
            }
        }
    }

    fn invoke_float(&mut self, by: PlayerId) -> EngineResult<()> {
        self.check_player(by)?;
        if by != self.rotation.captain() {
            return Err(EngineError::IllegalAction {
                action: "invoke_float".into(),
                reason: "only the captain may float".into(),
            });
        }
        if self.float_used[by] {
            return Err(EngineError::FloatAlreadyUsed { player: by });
        }
        if self.any_score_entered() {
            return Err(EngineError::IllegalAction {
                action: "invoke_float".into(),
                reason: "the float must be invoked before any hit".into(),
            });
        }

        self.float_used[by] = true;
        let before = self.wager.current_wager;
        self.wager.double();
        self.push_event(BetEventKind::Float, Some(by), before);
        Ok(())
    }

    fn turn_off_option(&mut self) -> EngineResult<()> {
        let before = self.wager.current_wager;
        self.wager.turn_off_option()?;
        self.events.push(BettingEvent::new(
            BetEventKind::OptionTurnedOff,
            Some(self.rotation.captain()),
            before,
            self.wager.current_wager,
        ));
        Ok(())
    }

    fn announce_duncan(&mut self) -> EngineResult<()> {
        if !matches!(self.formation.assignment, TeamAssignment::Solo { .. }) {
            return Err(EngineError::IllegalAction {
                action: "announce_duncan".into(),
                reason: "the duncan is a solo declaration".into(),
            });
        }
        if self.any_score_entered() {
            return Err(EngineError::IllegalAction {
                action: "announce_duncan".into(),
                reason: "the duncan must be declared before any tee shot".into(),
            });
        }

        self.wager.announce_duncan()?;
        let stake = self.wager.current_wager;
        self.push_event(BetEventKind::Duncan, Some(self.rotation.captain()), stake);
        Ok(())
    }

    fn invoke_joes_special(&mut self, wager: u32) -> EngineResult<()> {
        if self.rotation.phase != Phase::Hoepfinger {
            return Err(EngineError::IllegalAction {
                action: "invoke_joes_special".into(),
                reason: "only the goat in Hoepfinger sets the opening wager".into(),
            });
        }

        let before = self.wager.current_wager;
        self.wager.invoke_joes_special(wager, &self.config)?;
        self.events.push(BettingEvent::new(
            BetEventKind::JoesSpecial,
            self.rotation.goat,
            before,
            self.wager.current_wager,
        ));
        Ok(())
    }

    // === Hoepfinger rotation ===

    fn select_goat_position(&mut self, index: usize) -> EngineResult<()> {
        let goat = self.rotation.goat.ok_or_else(|| EngineError::IllegalAction {
            action: "select_goat_position".into(),
            reason: "no goat to seat outside Hoepfinger".into(),
        })?;

        self.rotation.select_goat_position(goat, index)?;
        // Captaincy moved before play; the opening composition re-runs so
        // the option lands on the right player.
        self.compose_opening_wager();
        Ok(())
    }

    // === Helpers ===

    fn check_player(&self, player: PlayerId) -> EngineResult<()> {
        if player.index() >= self.config.player_count {
            return Err(EngineError::MissingPlayerEntry { player });
        }
        Ok(())
    }

    fn any_score_entered(&self) -> bool {
        self.gross_scores.iter().any(|(_, s)| s.is_some())
    }

    fn push_event(&mut self, kind: BetEventKind, player: Option<PlayerId>, wager_before: u32) {
        self.events.push(BettingEvent::new(
            kind,
            player,
            wager_before,
            self.wager.current_wager,
        ));
    }
}
