//! Persistence Adapters - Session Snapshot Storage
//!
//! `JsonSnapshotStore` writes atomic JSON snapshots to disk and is the
//! primary store. `MemorySnapshotStore` keeps the last snapshot in
//! process and serves as the fallback when the disk write fails.

pub mod memory;
pub mod state;

pub use memory::MemorySnapshotStore;
pub use state::JsonSnapshotStore;
