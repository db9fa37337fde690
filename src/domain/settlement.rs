//! Settlement events and the resolution result.
//!
//! The engine never touches a bankroll. Everything a caller needs to pay
//! out, count streaks or advance quests is described by the events here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bet::{BetKey, Point, TravelKey};
use super::ledger::WagerLedger;
use super::table::TableState;

/// How a bet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Push => write!(f, "push"),
        }
    }
}

/// One resolved bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementEvent {
    /// The bet that resolved.
    pub bet: BetKey,
    /// Win, loss or push.
    pub outcome: Outcome,
    /// Stake at the time of resolution.
    pub stake: Decimal,
    /// Profit paid (zero for a loss or a push).
    pub profit: Decimal,
    /// True when the stake goes back to the bankroll; false when it stays
    /// on the table (or, for a loss, is forfeited).
    pub stake_returned: bool,
}

impl SettlementEvent {
    /// Winning bet; `stake_returned` says whether the stake comes down.
    pub const fn win(bet: BetKey, stake: Decimal, profit: Decimal, stake_returned: bool) -> Self {
        Self {
            bet,
            outcome: Outcome::Win,
            stake,
            profit,
            stake_returned,
        }
    }

    pub const fn loss(bet: BetKey, stake: Decimal) -> Self {
        Self {
            bet,
            outcome: Outcome::Loss,
            stake,
            profit: Decimal::ZERO,
            stake_returned: false,
        }
    }

    pub const fn push(bet: BetKey, stake: Decimal, stake_returned: bool) -> Self {
        Self {
            bet,
            outcome: Outcome::Push,
            stake,
            profit: Decimal::ZERO,
            stake_returned,
        }
    }

    /// Amount credited to the bankroll for this event.
    ///
    /// Stakes are debited when placed, so a loss credits nothing.
    pub fn bankroll_credit(&self) -> Decimal {
        let returned = if self.stake_returned {
            self.stake
        } else {
            Decimal::ZERO
        };
        match self.outcome {
            Outcome::Win => self.profit + returned,
            Outcome::Push => returned,
            Outcome::Loss => Decimal::ZERO,
        }
    }
}

/// What happened to the point on this roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseTransition {
    /// The phase did not change.
    None,
    /// Come-out roll of a point number.
    PointEstablished(Point),
    /// The point repeated before a seven.
    PointMade(Point),
    /// A seven while the point was on.
    SevenOut(Point),
}

/// A Come or Don't-Come bet that travelled to its number this roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    pub from: BetKey,
    pub to: TravelKey,
    pub stake: Decimal,
}

/// Output of one resolution: the next state plus everything that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub table: TableState,
    pub ledger: WagerLedger,
    pub events: Vec<SettlementEvent>,
    pub transition: PhaseTransition,
    pub migrations: Vec<Migration>,
}

impl Resolution {
    /// Net bankroll credit across every event.
    pub fn bankroll_credit(&self) -> Decimal {
        self.events.iter().map(SettlementEvent::bankroll_credit).sum()
    }

    /// Events for a single bet.
    pub fn events_for(&self, bet: BetKey) -> impl Iterator<Item = &SettlementEvent> + '_ {
        self.events.iter().filter(move |e| e.bet == bet)
    }
}
