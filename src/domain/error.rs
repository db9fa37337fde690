//! Domain error taxonomy.
//!
//! The engine only fails on malformed input. Absent bets are never an
//! error: they simply do not take part in a resolution.

use rust_decimal::Decimal;
use thiserror::Error;

use super::bet::{BetKey, Point};

/// Errors raised by the ledger, the table state and the resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrapsError {
    /// Roll total outside the 2..=12 range of two six-sided dice.
    #[error("invalid roll total {0}: must be in 2..=12")]
    InvalidRoll(u8),

    /// A single die outside 1..=6.
    #[error("invalid die face {0}: must be in 1..=6")]
    InvalidDie(u8),

    /// A number that is not one of 4, 5, 6, 8, 9, 10.
    #[error("{0} is not a point number")]
    InvalidPoint(u8),

    /// Stakes must be strictly positive.
    #[error("stake on {key} must be positive, got {amount}")]
    NonPositiveStake { key: BetKey, amount: Decimal },

    /// `establish_point` while a point is already on.
    #[error("point {0} is already established")]
    PointAlreadyEstablished(Point),

    /// A bet identifier outside the fixed vocabulary.
    #[error("unknown bet identifier '{0}'")]
    UnknownBet(String),
}
