//! The offer/accept/decline protocol.
//!
//! Per hole the machine runs `Idle -> OfferPending -> {Accepted | Declined}
//! -> Idle`. Only `Idle` may create an offer, so offers never stack. A
//! pending offer has no timeout; it sits until the other side answers.
//!
//! Floats, Duncans, and Joe's Specials never pass through here. They are
//! unilateral announcements, and the asymmetry against the double (which
//! needs the opponent's yes) is part of the game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::{EngineError, EngineResult};

/// Lifecycle of a single offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Declined,
}

/// A wager-escalation offer on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BettingOffer {
    pub id: u32,
    pub offered_by: PlayerId,
    pub wager_before: u32,
    pub wager_after: u32,
    pub status: OfferStatus,
}

/// The hole's offer machine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferProtocol {
    next_id: u32,
    pending: Option<BettingOffer>,
}

impl OfferProtocol {
    /// A double on the table, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&BettingOffer> {
        self.pending.as_ref()
    }

    /// Put a double on the table. Rejected while another offer is pending.
    pub fn offer_double(&mut self, by: PlayerId, current_wager: u32) -> EngineResult<&BettingOffer> {
        if let Some(pending) = &self.pending {
            return Err(EngineError::OfferAlreadyPending {
                pending_from: pending.offered_by,
            });
        }

        let offer = BettingOffer {
            id: self.next_id,
            offered_by: by,
            wager_before: current_wager,
            wager_after: current_wager * 2,
            status: OfferStatus::Pending,
        };
        self.next_id += 1;
        self.pending = Some(offer);
        Ok(self.pending.as_ref().expect("offer just placed"))
    }

    /// Accept the pending offer. The caller raises the ledger to
    /// `wager_after`.
    pub fn accept(&mut self) -> EngineResult<BettingOffer> {
        let mut offer = self.pending.take().ok_or(EngineError::NoPendingOffer)?;
        offer.status = OfferStatus::Accepted;
        Ok(offer)
    }

    /// Decline the pending offer. The stake is left where it was; what the
    /// decline means for the hole is the configured policy's business.
    pub fn decline(&mut self) -> EngineResult<BettingOffer> {
        let mut offer = self.pending.take().ok_or(EngineError::NoPendingOffer)?;
        offer.status = OfferStatus::Declined;
        Ok(offer)
    }

    /// Clear for a new hole. The id counter keeps running so offer ids
    /// stay unique across the round's event log.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}
