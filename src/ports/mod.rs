//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Interfaces the session layer needs from the outside world. Adapters
//! implement these traits.
//!
//! Port categories:
//! - `DiceSource`: where rolls come from (fair RNG or operator override)
//! - `SnapshotStore`: session snapshot persistence

pub mod dice;
pub mod repository;

pub use dice::DiceSource;
pub use repository::{SessionSnapshot, SnapshotStore};
