//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
  let path = path.as_ref();

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    table = %config.game.name,
    rolls = config.game.rolls,
    bankroll = %config.table.starting_bankroll,
    standing_bets = config.strategy.bets.len(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config TOML")?;
  validate_config(&config)?;
  Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(!config.game.name.is_empty(), "game.name must not be empty");
  anyhow::ensure!(config.game.rolls > 0, "game.rolls must be positive");

  // Table limits
  let table = &config.table;
  anyhow::ensure!(
    table.starting_bankroll > Decimal::ZERO,
    "starting_bankroll must be positive, got {}",
    table.starting_bankroll
  );
  anyhow::ensure!(
    table.min_bet > Decimal::ZERO,
    "min_bet must be positive, got {}",
    table.min_bet
  );
  anyhow::ensure!(
    table.max_bet >= table.min_bet,
    "max_bet ({}) must not be below min_bet ({})",
    table.max_bet,
    table.min_bet
  );
  if let Some(unlocked) = &table.unlocked_bets {
    for bet in unlocked {
      anyhow::ensure!(
        bet.travel().is_none(),
        "unlocked_bets: {bet} cannot be placed directly"
      );
    }
  }

  // Strategy
  anyhow::ensure!(
    config.strategy.stop_below >= Decimal::ZERO,
    "stop_below must not be negative"
  );
  for (i, standing) in config.strategy.bets.iter().enumerate() {
    anyhow::ensure!(
      standing.bet.travel().is_none(),
      "Strategy bet {} ({}) cannot be placed directly",
      i,
      standing.bet
    );
    anyhow::ensure!(
      standing.amount >= table.min_bet && standing.amount <= table.max_bet,
      "Strategy bet {} ({}) amount {} outside table limits [{}, {}]",
      i,
      standing.bet,
      standing.amount,
      table.min_bet,
      table.max_bet
    );
    if let Some(unlocked) = &table.unlocked_bets {
      anyhow::ensure!(
        unlocked.contains(&standing.bet),
        "Strategy bet {} ({}) is not unlocked",
        i,
        standing.bet
      );
    }
  }

  anyhow::ensure!(
    !config.persistence.data_dir.is_empty(),
    "persistence.data_dir must not be empty"
  );

  Ok(())
}
