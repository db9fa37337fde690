//! In-memory snapshot store, used as the fallback when disk fails.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::ports::repository::{SessionSnapshot, SnapshotStore};

/// Keeps the most recent snapshot in process memory.
#[derive(Default)]
pub struct MemorySnapshotStore {
    latest: RwLock<Option<SessionSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.latest.write().await = Some(snapshot.clone());
        debug!(session = %snapshot.session_id, "Snapshot kept in memory");
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.latest.read().await.clone())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
