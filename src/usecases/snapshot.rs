//! Snapshot Persistence with Fallback
//!
//! Saves go to the primary store first. When that fails the snapshot goes
//! to the secondary store and the failure is surfaced as a warning rather
//! than an error. Only a failure of both stores is fatal.

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::ports::repository::{SessionSnapshot, SnapshotStore};

/// Which store took a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
  Primary(String),
  Fallback {
    store: String,
    /// Why the primary store refused the write.
    primary_error: String,
  },
}

impl SaveOutcome {
  pub const fn used_fallback(&self) -> bool {
    matches!(self, Self::Fallback { .. })
  }
}

#[instrument(skip_all, fields(session = %snapshot.session_id))]
pub async fn save_with_fallback(
  primary: &dyn SnapshotStore,
  secondary: &dyn SnapshotStore,
  snapshot: &SessionSnapshot,
) -> Result<SaveOutcome> {
  let primary_error = match primary.save(snapshot).await {
    Ok(()) => return Ok(SaveOutcome::Primary(primary.name().to_string())),
    Err(e) => e,
  };

  warn!(
    store = primary.name(),
    fallback = secondary.name(),
    error = %primary_error,
    "Primary snapshot store failed, using fallback"
  );

  secondary
    .save(snapshot)
    .await
    .with_context(|| format!("Fallback store {} also failed", secondary.name()))?;

  Ok(SaveOutcome::Fallback {
    store: secondary.name().to_string(),
    primary_error: format!("{primary_error:#}"),
  })
}

/// Loads from the primary store, then the secondary when the primary has
/// nothing or cannot be read.
#[instrument(skip_all)]
pub async fn load_with_fallback(
  primary: &dyn SnapshotStore,
  secondary: &dyn SnapshotStore,
) -> Result<Option<SessionSnapshot>> {
  match primary.load().await {
    Ok(Some(snapshot)) => return Ok(Some(snapshot)),
    Ok(None) => {}
    Err(e) => warn!(store = primary.name(), error = %e, "Primary snapshot unreadable"),
  }

  let snapshot = secondary
    .load()
    .await
    .with_context(|| format!("Failed to load from {}", secondary.name()))?;
  if snapshot.is_some() {
    info!(store = secondary.name(), "Snapshot loaded from fallback store");
  }
  Ok(snapshot)
}
