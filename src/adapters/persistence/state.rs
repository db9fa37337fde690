//! Snapshot Store - Atomic JSON Session Persistence
//!
//! Saves session snapshots to `session.json` using atomic writes
//! (write to tmp file, then rename), so the file is always either the
//! old or the new snapshot, never a partial write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument};

use crate::ports::repository::{SessionSnapshot, SnapshotStore};

const SNAPSHOT_FILE: &str = "session.json";

/// Atomic JSON snapshot store.
pub struct JsonSnapshotStore {
    /// Path to session.json.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store in the given data directory, creating it if needed.
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

        Ok(Self {
            path: dir.join(SNAPSHOT_FILE),
            tmp_path: dir.join(format!("{SNAPSHOT_FILE}.tmp")),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    fn name(&self) -> &'static str {
        "json-file"
    }

    #[instrument(skip(self, snapshot), fields(session = %snapshot.session_id))]
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let json =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp snapshot file")?;

        fs::rename(&self.tmp_path, &self.path)
            .await
            .context("Failed to rename snapshot file")?;

        info!(
            path = %self.path.display(),
            bankroll = %snapshot.bankroll,
            bets = snapshot.ledger.len(),
            "Session snapshot saved"
        );
        Ok(())
    }

    /// Returns `None` on first startup, when no snapshot exists.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            info!("No snapshot file found, starting fresh");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .await
            .context("Failed to read snapshot file")?;
        let snapshot: SessionSnapshot =
            serde_json::from_str(&json).context("Failed to parse snapshot JSON")?;

        info!(
            version = %snapshot.version,
            session = %snapshot.session_id,
            bets = snapshot.ledger.len(),
            "Session snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    async fn is_healthy(&self) -> bool {
        match fs::metadata(&self.path).await {
            Ok(meta) => meta.is_file(),
            // First run is OK as long as the directory is there.
            Err(_) => self
                .path
                .parent()
                .is_some_and(|dir| dir.is_dir()),
        }
    }
}
