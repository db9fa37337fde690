//! Table Session - Bankroll, Bets and Rolls
//!
//! The calling layer around the pure engine. Owns the bankroll, the
//! table, the ledger and the stats, and enforces the table rules for
//! putting bets up and taking them down:
//! - Pass line only during the come-out
//! - Pass line odds only behind a pass line once a point is on
//! - Every stake within the table limits
//! - One-roll bets and travelled come bets stay up once placed
//! - No roll without at least one bet on the table
//!
//! Every mutation takes `&mut self`, so rolls are serialized. A roll
//! resolves against borrowed state and the result is swapped in whole.

use std::collections::BTreeSet;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
  self, BetKey, CrapsError, Migration, PhaseTransition, Roll, SettlementEvent, TableState,
  WagerLedger,
};
use crate::config::TableConfig;
use crate::ports::dice::DiceSource;
use crate::ports::repository::{SNAPSHOT_VERSION, SessionSnapshot};
use crate::usecases::stats::SessionStats;

/// Errors from the calling layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
  #[error("insufficient funds: need {needed}, have {available}")]
  InsufficientFunds { needed: Decimal, available: Decimal },

  #[error("no bets on the table")]
  NoActiveBets,

  #[error("bet {0} cannot be placed right now")]
  BetUnavailable(BetKey),

  #[error("bet {0} cannot be taken down")]
  BetLocked(BetKey),

  #[error("stake {amount} outside table limits [{min}, {max}]")]
  OutsideTableLimits {
    min: Decimal,
    max: Decimal,
    amount: Decimal,
  },

  #[error("unsupported snapshot version {0}")]
  UnsupportedSnapshot(String),

  #[error(transparent)]
  Craps(#[from] CrapsError),
}

/// What one roll did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollReport {
  /// The dice, when the roll came from a dice source.
  pub dice: Option<(u8, u8)>,
  pub total: u8,
  pub events: Vec<SettlementEvent>,
  pub transition: PhaseTransition,
  pub migrations: Vec<Migration>,
  /// Amount credited to the bankroll by this roll.
  pub credited: Decimal,
  /// Bankroll after the roll.
  pub bankroll: Decimal,
}

/// Smallest and largest stake a single bet may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
  pub min_bet: Decimal,
  pub max_bet: Decimal,
}

impl TableLimits {
  /// Any positive stake.
  pub const UNLIMITED: Self = Self {
    min_bet: Decimal::ZERO,
    max_bet: Decimal::MAX,
  };

  pub const fn new(min_bet: Decimal, max_bet: Decimal) -> Self {
    Self { min_bet, max_bet }
  }

  pub fn from_config(config: &TableConfig) -> Self {
    Self::new(config.min_bet, config.max_bet)
  }

  pub fn allows(&self, stake: Decimal) -> bool {
    stake >= self.min_bet && stake <= self.max_bet
  }
}

impl Default for TableLimits {
  fn default() -> Self {
    Self::UNLIMITED
  }
}

/// One player at one table.
#[derive(Debug, Clone)]
pub struct TableSession {
  id: Uuid,
  bankroll: Decimal,
  table: TableState,
  ledger: WagerLedger,
  stats: SessionStats,
  unlocked: BTreeSet<BetKey>,
  limits: TableLimits,
}

impl TableSession {
  /// A fresh session with every placeable bet unlocked.
  pub fn new(bankroll: Decimal) -> Self {
    Self::with_unlocked(bankroll, BetKey::placeable())
  }

  /// A fresh session where only `unlocked` bets may be placed.
  pub fn with_unlocked(bankroll: Decimal, unlocked: impl IntoIterator<Item = BetKey>) -> Self {
    Self {
      id: Uuid::new_v4(),
      bankroll,
      table: TableState::new(),
      ledger: WagerLedger::new(),
      stats: SessionStats::default(),
      unlocked: unlocked.into_iter().filter(|k| k.travel().is_none()).collect(),
      limits: TableLimits::UNLIMITED,
    }
  }

  /// Applies the table's stake limits to every later `place_bet`.
  #[must_use]
  pub fn with_limits(mut self, limits: TableLimits) -> Self {
    self.limits = limits;
    self
  }

  pub const fn id(&self) -> Uuid {
    self.id
  }

  pub const fn bankroll(&self) -> Decimal {
    self.bankroll
  }

  pub const fn table(&self) -> &TableState {
    &self.table
  }

  pub const fn ledger(&self) -> &WagerLedger {
    &self.ledger
  }

  pub const fn stats(&self) -> &SessionStats {
    &self.stats
  }

  pub const fn unlocked_bets(&self) -> &BTreeSet<BetKey> {
    &self.unlocked
  }

  pub const fn limits(&self) -> TableLimits {
    self.limits
  }

  pub fn unlock(&mut self, key: BetKey) {
    if key.travel().is_none() && self.unlocked.insert(key) {
      info!(bet = %key, "Bet unlocked");
    }
  }

  /// Whether `key` could be placed now, ignoring funds.
  pub fn can_place(&self, key: BetKey) -> bool {
    self.placement_error(key).is_none()
  }

  fn placement_error(&self, key: BetKey) -> Option<SessionError> {
    let unavailable = key.travel().is_some()
      || !self.unlocked.contains(&key)
      || (key == BetKey::PassLine && !self.table.is_come_out())
      || (key == BetKey::PassLineOdds
        && (self.table.is_come_out() || !self.ledger.contains(BetKey::PassLine)));
    unavailable.then_some(SessionError::BetUnavailable(key))
  }

  /// Puts `amount` up on `key`, debiting the bankroll. The limits apply
  /// to the whole stake on `key` after the placement.
  #[instrument(skip(self), fields(session = %self.id))]
  pub fn place_bet(&mut self, key: BetKey, amount: Decimal) -> Result<(), SessionError> {
    if amount <= Decimal::ZERO {
      return Err(CrapsError::NonPositiveStake { key, amount }.into());
    }
    if let Some(err) = self.placement_error(key) {
      return Err(err);
    }
    let stake = self.ledger.stake(key).unwrap_or_default() + amount;
    if !self.limits.allows(stake) {
      return Err(SessionError::OutsideTableLimits {
        min: self.limits.min_bet,
        max: self.limits.max_bet,
        amount: stake,
      });
    }
    if amount > self.bankroll {
      return Err(SessionError::InsufficientFunds {
        needed: amount,
        available: self.bankroll,
      });
    }

    self.ledger.place_stake(key, amount)?;
    self.bankroll -= amount;
    debug!(bet = %key, %amount, bankroll = %self.bankroll, "Bet placed");
    Ok(())
  }

  /// Whether the stake on `key` may be taken down now.
  pub fn can_remove(&self, key: BetKey) -> bool {
    !(key.is_one_roll()
      || key.travel().is_some()
      || (key == BetKey::PassLine && !self.table.is_come_out()))
  }

  /// Takes the bet on `key` down and credits its stake. Taking down a bet
  /// that is not up returns zero.
  #[instrument(skip(self), fields(session = %self.id))]
  pub fn remove_bet(&mut self, key: BetKey) -> Result<Decimal, SessionError> {
    if !self.ledger.contains(key) {
      return Ok(Decimal::ZERO);
    }
    if !self.can_remove(key) {
      return Err(SessionError::BetLocked(key));
    }

    let amount = self.ledger.remove_stake(key);
    self.bankroll += amount;
    debug!(bet = %key, %amount, bankroll = %self.bankroll, "Bet taken down");
    Ok(amount)
  }

  /// Rolls the dice from `dice` and settles the table.
  pub fn roll(&mut self, dice: &mut impl DiceSource) -> Result<RollReport, SessionError> {
    self.ensure_bets()?;
    let (die1, die2) = dice.roll();
    let roll = Roll::from_dice(die1, die2)?;
    Ok(self.settle(roll))
  }

  /// Settles the table for a roll known only by its total.
  pub fn roll_total(&mut self, total: u8) -> Result<RollReport, SessionError> {
    self.ensure_bets()?;
    let roll = Roll::from_total(total)?;
    Ok(self.settle(roll))
  }

  fn ensure_bets(&self) -> Result<(), SessionError> {
    if self.ledger.total_staked() > Decimal::ZERO {
      Ok(())
    } else {
      Err(SessionError::NoActiveBets)
    }
  }

  #[instrument(skip(self), fields(session = %self.id))]
  fn settle(&mut self, roll: Roll) -> RollReport {
    let resolution = domain::resolve(&self.table, &self.ledger, roll);
    let credited = resolution.bankroll_credit();

    self.bankroll += credited;
    self.stats.record_roll();
    self.stats.apply_all(&resolution.events);
    self.table = resolution.table;
    self.ledger = resolution.ledger;

    info!(
      total = roll.total(),
      events = resolution.events.len(),
      %credited,
      bankroll = %self.bankroll,
      point = ?self.table.point,
      "Roll settled"
    );

    RollReport {
      dice: roll.dice(),
      total: roll.total(),
      events: resolution.events,
      transition: resolution.transition,
      migrations: resolution.migrations,
      credited,
      bankroll: self.bankroll,
    }
  }

  pub fn snapshot(&self) -> SessionSnapshot {
    SessionSnapshot {
      version: SNAPSHOT_VERSION.to_string(),
      session_id: self.id,
      saved_at: Utc::now(),
      bankroll: self.bankroll,
      table: self.table.clone(),
      ledger: self.ledger.clone(),
      stats: self.stats.clone(),
      unlocked_bets: self.unlocked.clone(),
    }
  }

  /// Resumes a session. Empty stakes are dropped and the travel maps are
  /// brought back in line with the ledger. Limits start unlimited; apply
  /// the table's with `with_limits`.
  pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SessionError> {
    if snapshot.version != SNAPSHOT_VERSION {
      return Err(SessionError::UnsupportedSnapshot(snapshot.version));
    }
    let SessionSnapshot {
      session_id,
      bankroll,
      mut table,
      mut ledger,
      stats,
      unlocked_bets,
      ..
    } = snapshot;

    ledger.prune();
    table.reconcile_travel(&ledger);

    let unlocked = if unlocked_bets.is_empty() {
      warn!(session = %session_id, "Snapshot has no unlocked bets, unlocking all");
      BetKey::placeable().into_iter().collect()
    } else {
      unlocked_bets
    };
    info!(session = %session_id, %bankroll, bets = ledger.len(), "Session restored");

    Ok(Self {
      id: session_id,
      bankroll,
      table,
      ledger,
      stats,
      unlocked,
      limits: TableLimits::UNLIMITED,
    })
  }
}
