//! The hole's wager and its multipliers.
//!
//! The current wager starts each hole from the carried-forward value and is
//! only ever raised by defined actions: the hole-start composition
//! (variation, carry-over, option), an accepted double, a float, an
//! aardvark toss. Joe's Special is the one override, replacing the
//! composition with a menu pick. `current_wager >= next_hole_wager` holds
//! throughout.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::rotation::Phase;

/// Payout terms for the hole.
///
/// Even money unless a 3-for-2 declaration (Duncan, Tunkarri, or an
/// invisible-aardvark toss) is in play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutRatio {
    #[default]
    EvenMoney,
    ThreeForTwo,
}

impl PayoutRatio {
    /// Multiplier applied to each losing player's payment.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            PayoutRatio::EvenMoney => 1.0,
            PayoutRatio::ThreeForTwo => 1.5,
        }
    }
}

/// Hole-scoped wager state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WagerState {
    /// Round constant: the opening stake.
    pub base_wager: u32,
    /// The stake the next hole opens from.
    pub next_hole_wager: u32,
    /// The hole's live stake.
    pub current_wager: u32,
    /// The previous hole tied in full; this hole's stake doubles.
    pub carry_over: bool,
    /// Consecutive fully-tied holes, for the carry-over cap.
    pub carry_over_streak: u32,
    pub vinnies_variation: bool,
    pub option_active: bool,
    pub option_turned_off: bool,
    pub duncan_invoked: bool,
    pub joes_special_wager: Option<u32>,
    pub payout_ratio: PayoutRatio,
}

impl WagerState {
    /// Fresh ledger at round start.
    #[must_use]
    pub fn new(base_wager: u32) -> Self {
        Self {
            base_wager,
            next_hole_wager: base_wager,
            current_wager: base_wager,
            carry_over: false,
            carry_over_streak: 0,
            vinnies_variation: false,
            option_active: false,
            option_turned_off: false,
            duncan_invoked: false,
            joes_special_wager: None,
            payout_ratio: PayoutRatio::default(),
        }
    }

    /// Compose the hole-opening wager.
    ///
    /// current = next-hole wager, doubled for Vinnie's Variation, doubled
    /// for an uncapped carry-over, doubled again when the option applies
    /// (captain is the goat). Hole-scoped flags reset here.
    pub fn start_hole(&mut self, phase: Phase, option_applies: bool, config: &GameConfig) {
        self.vinnies_variation = phase == Phase::VinniesVariation;
        self.option_active = option_applies;
        self.option_turned_off = false;
        self.duncan_invoked = false;
        self.joes_special_wager = None;
        self.payout_ratio = PayoutRatio::default();

        let mut wager = self.next_hole_wager;
        if self.vinnies_variation {
            wager *= 2;
        }
        if self.carry_over && self.carry_over_streak <= config.carry_over_cap {
            wager *= 2;
        }
        if option_applies {
            wager *= 2;
        }

        self.current_wager = wager;
        log::debug!(
            "hole opens at {wager}q (carry_over={}, variation={}, option={})",
            self.carry_over,
            self.vinnies_variation,
            option_applies
        );
    }

    /// Double the current wager (accepted double, float, aardvark toss).
    pub fn double(&mut self) {
        self.current_wager *= 2;
    }

    /// Set the wager directly (accepted offer carries its after-value).
    pub fn set_current(&mut self, wager: u32) {
        self.current_wager = wager;
    }

    /// Turn the option off, halving the stake back toward the base.
    pub fn turn_off_option(&mut self) -> EngineResult<()> {
        if !self.option_active {
            return Err(EngineError::IllegalAction {
                action: "turn_off_option".into(),
                reason: "option is not active".into(),
            });
        }
        if self.option_turned_off {
            return Err(EngineError::IllegalAction {
                action: "turn_off_option".into(),
                reason: "option already turned off".into(),
            });
        }

        self.option_turned_off = true;
        self.current_wager = (self.current_wager / 2).max(self.next_hole_wager);
        Ok(())
    }

    /// Duncan: solo payout switches to 3-for-2; the stake is untouched.
    pub fn announce_duncan(&mut self) -> EngineResult<()> {
        if self.duncan_invoked {
            return Err(EngineError::IllegalAction {
                action: "announce_duncan".into(),
                reason: "duncan already declared".into(),
            });
        }

        self.duncan_invoked = true;
        self.payout_ratio = PayoutRatio::ThreeForTwo;
        Ok(())
    }

    /// Joe's Special: the goat opens the hole at a menu wager, overriding
    /// carry-over and variation composition.
    pub fn invoke_joes_special(&mut self, wager: u32, config: &GameConfig) -> EngineResult<()> {
        if !config.joes_special_menu.contains(&wager) {
            return Err(EngineError::WagerNotOnMenu {
                wager,
                menu: config.joes_special_menu.clone(),
            });
        }

        self.joes_special_wager = Some(wager);
        self.current_wager = wager;
        Ok(())
    }

    /// Record the hole's outcome for carry-over bookkeeping.
    pub fn record_outcome(&mut self, fully_tied: bool) {
        if fully_tied {
            self.carry_over = true;
            self.carry_over_streak += 1;
        } else {
            self.carry_over = false;
            self.carry_over_streak = 0;
        }
    }
}
