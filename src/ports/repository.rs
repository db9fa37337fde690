//! Repository Port - Session Snapshot Persistence
//!
//! Snapshots are opaque to the store: it only has to hand back what it
//! was given. A primary store (JSON file) and a secondary store
//! (in-memory) both implement `SnapshotStore`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BetKey, TableState, WagerLedger};
use crate::usecases::stats::SessionStats;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: &str = "1";

/// Everything needed to resume a table session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
  /// Version of the snapshot format.
  pub version: String,
  /// Session identifier.
  pub session_id: Uuid,
  /// When the snapshot was taken.
  pub saved_at: DateTime<Utc>,
  /// Chips not on the table.
  pub bankroll: Decimal,
  /// Point and travel maps.
  pub table: TableState,
  /// Stakes on the table.
  pub ledger: WagerLedger,
  /// Counters and streaks.
  pub stats: SessionStats,
  /// Bets the player may place.
  #[serde(default)]
  pub unlocked_bets: BTreeSet<BetKey>,
}

/// Trait for snapshot persistence providers.
#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
  /// Human-readable store name for logs and fallback reports.
  fn name(&self) -> &'static str;

  /// Persist a snapshot, replacing any previous one.
  async fn save(&self, snapshot: &SessionSnapshot) -> anyhow::Result<()>;

  /// Load the most recent snapshot, `None` if nothing was saved yet.
  async fn load(&self) -> anyhow::Result<Option<SessionSnapshot>>;

  /// Check if the store is usable (permissions, reachability).
  async fn is_healthy(&self) -> bool;
}
