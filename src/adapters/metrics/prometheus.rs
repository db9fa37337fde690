//! Prometheus Metrics Registry - Table Observability
//!
//! All metrics follow the naming convention `idle_craps_*`. The registry
//! only consumes settlement events; it never looks at session state.

use prometheus::{Counter, Encoder, Gauge, IntCounterVec, Opts, Registry, TextEncoder};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::{Outcome, SettlementEvent};

/// Centralized Prometheus metrics for a table session.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Rolls resolved, by total.
    pub rolls: IntCounterVec,
    /// Settlement events, by bet and outcome.
    pub settlements: IntCounterVec,
    /// Profit paid on winning bets.
    pub profit_paid: Counter,
    /// Stakes forfeited on losing bets.
    pub stakes_lost: Counter,
    /// Bankroll after the last roll.
    pub bankroll: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let rolls = IntCounterVec::new(
            Opts::new("idle_craps_rolls_total", "Rolls resolved by dice total"),
            &["total"],
        )?;

        let settlements = IntCounterVec::new(
            Opts::new(
                "idle_craps_settlements_total",
                "Settlement events by bet and outcome",
            ),
            &["bet", "outcome"],
        )?;

        let profit_paid =
            Counter::new("idle_craps_profit_paid_total", "Profit paid on winning bets")?;

        let stakes_lost =
            Counter::new("idle_craps_stakes_lost_total", "Stakes forfeited on losing bets")?;

        let bankroll = Gauge::new("idle_craps_bankroll", "Bankroll after the last roll")?;

        registry.register(Box::new(rolls.clone()))?;
        registry.register(Box::new(settlements.clone()))?;
        registry.register(Box::new(profit_paid.clone()))?;
        registry.register(Box::new(stakes_lost.clone()))?;
        registry.register(Box::new(bankroll.clone()))?;

        Ok(Self {
            registry,
            rolls,
            settlements,
            profit_paid,
            stakes_lost,
            bankroll,
        })
    }

    /// Count one resolved roll and its settlement events.
    pub fn record_resolution(&self, total: u8, events: &[SettlementEvent]) {
        let total = total.to_string();
        self.rolls.with_label_values(&[total.as_str()]).inc();

        for event in events {
            let bet = event.bet.to_string();
            let outcome = event.outcome.to_string();
            self.settlements
                .with_label_values(&[bet.as_str(), outcome.as_str()])
                .inc();
            match event.outcome {
                Outcome::Win => self.profit_paid.inc_by(as_f64(event.profit)),
                Outcome::Loss => self.stakes_lost.inc_by(as_f64(event.stake)),
                Outcome::Push => {}
            }
        }
    }

    pub fn set_bankroll(&self, bankroll: Decimal) {
        self.bankroll.set(as_f64(bankroll));
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn as_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}
