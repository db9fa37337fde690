//! Session Statistics - Event Consumer for Streaks and Counters
//!
//! Folds settlement events into the counters quests and achievements
//! read. Streaks advance per event, in event order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BetKey, Outcome, SettlementEvent};

/// Running counters for one table session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStats {
  pub total_rolls: u64,
  pub total_wins: u64,
  pub total_losses: u64,
  pub total_pushes: u64,
  /// Consecutive wins, reset by a loss.
  pub current_streak: u32,
  pub highest_streak: u32,
  /// Consecutive losses, reset by a win.
  pub current_loss_streak: u32,
  pub highest_loss_streak: u32,
  /// Sum of profits paid (stakes returned are not winnings).
  pub total_winnings: Decimal,
  pub wins_by_bet: BTreeMap<BetKey, u64>,
}

impl SessionStats {
  pub fn record_roll(&mut self) {
    self.total_rolls += 1;
  }

  /// Folds one settlement event into the counters.
  pub fn apply(&mut self, event: &SettlementEvent) {
    match event.outcome {
      Outcome::Win => {
        self.total_wins += 1;
        self.total_winnings += event.profit;
        *self.wins_by_bet.entry(event.bet).or_default() += 1;
        self.current_streak += 1;
        self.highest_streak = self.highest_streak.max(self.current_streak);
        self.current_loss_streak = 0;
      }
      Outcome::Loss => {
        self.total_losses += 1;
        self.current_streak = 0;
        self.current_loss_streak += 1;
        self.highest_loss_streak = self.highest_loss_streak.max(self.current_loss_streak);
      }
      Outcome::Push => self.total_pushes += 1,
    }
  }

  pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SettlementEvent>) {
    for event in events {
      self.apply(event);
    }
  }

  pub fn wins_for(&self, bet: BetKey) -> u64 {
    self.wins_by_bet.get(&bet).copied().unwrap_or_default()
  }
}
