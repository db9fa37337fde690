//! Domain layer - Craps round resolution.
//!
//! Pure table logic: bet keys, the wager ledger, table state, payouts and
//! the resolution engine. No I/O, no randomness, no bankroll.
//! All types are serializable and testable in isolation.

pub mod bet;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod payout;
pub mod roll;
pub mod settlement;
pub mod table;

// Re-export core types for convenience
pub use bet::{BetKey, HardNumber, Point, Proposition, TravelKey, TravelKind};
pub use engine::{resolve, resolve_dice, resolve_roll};
pub use error::CrapsError;
pub use ledger::WagerLedger;
pub use roll::Roll;
pub use settlement::{Migration, Outcome, PhaseTransition, Resolution, SettlementEvent};
pub use table::{Phase, TableState};
