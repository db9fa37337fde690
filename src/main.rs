//! Idle Craps — Auto-Play Entry Point
//!
//! Plays an idle table until the configured number of rolls is reached,
//! the bankroll runs dry, or SIGINT arrives.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the snapshot stores (JSON file primary, memory fallback)
//! 4. Restore the last session or start a new one
//! 5. Roll loop: re-place standing bets, roll, record metrics
//! 6. Save the snapshot (with fallback) and log a summary

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use idle_craps_engine::adapters::dice::FairDice;
use idle_craps_engine::adapters::metrics::MetricsRegistry;
use idle_craps_engine::adapters::persistence::{JsonSnapshotStore, MemorySnapshotStore};
use idle_craps_engine::config::{self, AppConfig};
use idle_craps_engine::ports::repository::SnapshotStore;
use idle_craps_engine::usecases::{
    BettingStrategy, SessionError, TableLimits, TableSession, load_with_fallback,
    save_with_fallback,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config =
        config::loader::load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.game.log_level)),
        )
        .json()
        .init();

    info!(
        table = %config.game.name,
        version = env!("CARGO_PKG_VERSION"),
        rolls = config.game.rolls,
        seeded = config.game.seed.is_some(),
        "Starting idle craps table"
    );

    // ── 3. Snapshot stores ──────────────────────────────────
    let primary = JsonSnapshotStore::new(&config.persistence.data_dir)
        .await
        .context("Failed to open snapshot directory")?;
    let fallback = MemorySnapshotStore::new();
    if !primary.is_healthy().await {
        warn!(store = primary.name(), "Snapshot store unhealthy, saves may fall back");
    }

    // ── 4. Restore or start a session ───────────────────────
    let mut session = open_session(&config, &primary, &fallback).await?;

    let metrics = if config.metrics.enabled {
        Some(MetricsRegistry::new().context("Failed to register metrics")?)
    } else {
        None
    };

    // ── 5. Roll loop until done or SIGINT ───────────────────
    tokio::select! {
        result = play(&config, &mut session, metrics.as_ref(), &primary, &fallback) => {
            if let Err(e) = result {
                error!(error = %e, "Auto-play stopped with an error");
            }
        }
        _ = signal::ctrl_c() => {
            info!("SIGINT received, saving session");
        }
    }

    // ── 6. Save and summarize ───────────────────────────────
    let outcome = save_with_fallback(&primary, &fallback, &session.snapshot())
        .await
        .context("Failed to save session snapshot")?;

    let stats = session.stats();
    info!(
        session = %session.id(),
        bankroll = %session.bankroll(),
        on_table = %session.ledger().total_staked(),
        rolls = stats.total_rolls,
        wins = stats.total_wins,
        losses = stats.total_losses,
        highest_streak = stats.highest_streak,
        winnings = %stats.total_winnings,
        saved_to = ?outcome,
        "Session summary"
    );

    if let Some(metrics) = &metrics {
        info!(metrics = %metrics.render()?, "Final metrics");
    }

    info!("Shutdown complete");
    Ok(())
}

async fn open_session(
    config: &AppConfig,
    primary: &dyn SnapshotStore,
    fallback: &dyn SnapshotStore,
) -> Result<TableSession> {
    let limits = TableLimits::from_config(&config.table);
    if config.persistence.resume {
        if let Some(snapshot) = load_with_fallback(primary, fallback).await? {
            return Ok(TableSession::restore(snapshot)?.with_limits(limits));
        }
    }

    let session = match &config.table.unlocked_bets {
        Some(unlocked) => {
            TableSession::with_unlocked(config.table.starting_bankroll, unlocked.iter().copied())
        }
        None => TableSession::new(config.table.starting_bankroll),
    }
    .with_limits(limits);
    info!(session = %session.id(), bankroll = %session.bankroll(), "New session");
    Ok(session)
}

/// Auto-play: standing bets up, roll, repeat.
async fn play(
    config: &AppConfig,
    session: &mut TableSession,
    metrics: Option<&MetricsRegistry>,
    primary: &dyn SnapshotStore,
    fallback: &dyn SnapshotStore,
) -> Result<()> {
    let strategy = BettingStrategy::from_config(&config.strategy);
    let mut dice = config.game.seed.map_or_else(FairDice::new, FairDice::seeded);
    let interval = Duration::from_millis(config.game.roll_interval_ms);
    let snapshot_every = config.persistence.snapshot_every_rolls;

    for n in 1..=config.game.rolls {
        strategy.place_standing_bets(session);
        if strategy.should_stop(session) {
            warn!(bankroll = %session.bankroll(), "Bankroll below floor, stopping");
            break;
        }

        let report = match session.roll(&mut dice) {
            Ok(report) => report,
            Err(SessionError::NoActiveBets) => {
                warn!("Nothing on the table and nothing placeable, stopping");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(metrics) = metrics {
            metrics.record_resolution(report.total, &report.events);
            metrics.set_bankroll(report.bankroll);
        }

        if snapshot_every > 0 && n % snapshot_every == 0 {
            save_with_fallback(primary, fallback, &session.snapshot()).await?;
        }

        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }

    Ok(())
}
