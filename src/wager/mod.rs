//! The wager ledger and the offer/accept/decline protocol.

pub mod ledger;
pub mod offer;

pub use ledger::{PayoutRatio, WagerState};
pub use offer::{BettingOffer, OfferProtocol, OfferStatus};
