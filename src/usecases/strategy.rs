//! Betting Strategy - Auto-Play Standing Bets
//!
//! Before each roll, every standing bet that is not on the table is put
//! back up, provided the table allows it right now and the bankroll
//! covers it. Pass line after the point, locked bets and unaffordable
//! bets are skipped for this roll, not dropped.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{StandingBet, StrategyConfig};
use crate::domain::BetKey;
use crate::usecases::session::TableSession;

#[derive(Debug, Clone, Default)]
pub struct BettingStrategy {
  bets: Vec<StandingBet>,
  stop_below: Decimal,
}

impl BettingStrategy {
  pub fn new(bets: Vec<StandingBet>, stop_below: Decimal) -> Self {
    Self { bets, stop_below }
  }

  pub fn from_config(config: &StrategyConfig) -> Self {
    Self::new(config.bets.clone(), config.stop_below)
  }

  /// Re-places absent standing bets. Returns the keys placed.
  pub fn place_standing_bets(&self, session: &mut TableSession) -> Vec<BetKey> {
    let mut placed = Vec::new();
    for StandingBet { bet, amount } in &self.bets {
      if session.ledger().contains(*bet) || !session.can_place(*bet) {
        continue;
      }
      match session.place_bet(*bet, *amount) {
        Ok(()) => placed.push(*bet),
        Err(e) => debug!(bet = %bet, error = %e, "Standing bet skipped"),
      }
    }
    placed
  }

  /// Whether auto-play should stop: the bankroll fell below the floor
  /// and nothing is left working on the table.
  pub fn should_stop(&self, session: &TableSession) -> bool {
    session.bankroll() < self.stop_below && session.ledger().is_empty()
  }
}
