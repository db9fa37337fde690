//! Configuration Module - TOML-based Game Configuration
//!
//! Loads and validates configuration from `config.toml`. Table limits,
//! the starting bankroll and the auto-play betting plan all live here;
//! payout tables stay in the domain layer.

pub mod loader;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::BetKey;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Identity, logging and the auto-play run.
  pub game: GameConfig,
  /// Table limits and starting bankroll.
  pub table: TableConfig,
  /// Bets the auto-player keeps up.
  #[serde(default)]
  pub strategy: StrategyConfig,
  /// Snapshot storage.
  #[serde(default)]
  pub persistence: PersistenceConfig,
  /// Metrics export.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
  /// Human-readable table name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Rolls to play per run.
  #[serde(default = "default_rolls")]
  pub rolls: u32,
  /// Pause between rolls (milliseconds). Zero plays as fast as possible.
  #[serde(default)]
  pub roll_interval_ms: u64,
  /// Seed for reproducible dice. Entropy when absent.
  pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
  /// Bankroll of a brand-new session.
  #[serde(default = "default_bankroll")]
  pub starting_bankroll: Decimal,
  /// Smallest stake a bet may carry. Enforced by the session on every
  /// placement and checked against the strategy at load time.
  #[serde(default = "default_min_bet")]
  pub min_bet: Decimal,
  /// Largest stake a bet may carry, counting stakes already on it.
  #[serde(default = "default_max_bet")]
  pub max_bet: Decimal,
  /// Bets unlocked for a new session. All placeable bets when absent.
  pub unlocked_bets: Option<Vec<BetKey>>,
}

/// One standing bet of the auto-play strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StandingBet {
  pub bet: BetKey,
  pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyConfig {
  /// Re-placed before each roll when absent and placeable.
  #[serde(default)]
  pub bets: Vec<StandingBet>,
  /// Stop playing once the bankroll drops below this.
  #[serde(default)]
  pub stop_below: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for the session snapshot.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
  /// Save a snapshot every N rolls. Zero saves only at the end.
  #[serde(default = "default_snapshot_every")]
  pub snapshot_every_rolls: u32,
  /// Resume from the last snapshot when one exists.
  #[serde(default = "default_true")]
  pub resume: bool,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
      snapshot_every_rolls: default_snapshot_every(),
      resume: default_true(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Collect Prometheus metrics and log them at the end of the run.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_rolls() -> u32 {
  100
}

fn default_bankroll() -> Decimal {
  dec!(500)
}

fn default_min_bet() -> Decimal {
  dec!(1)
}

fn default_max_bet() -> Decimal {
  dec!(1000)
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_snapshot_every() -> u32 {
  25
}
