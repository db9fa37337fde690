//! Use Cases Layer - Application Logic
//!
//! Orchestrates the pure engine with the port interfaces.
//!
//! Use cases:
//! - `TableSession`: bankroll, bet placement rules, rolls
//! - `SessionStats`: streaks and counters folded from settlement events
//! - `snapshot`: save and load with a fallback store
//! - `strategy`: the auto-play betting plan

pub mod session;
pub mod snapshot;
pub mod stats;
pub mod strategy;

pub use session::{RollReport, SessionError, TableLimits, TableSession};
pub use snapshot::{SaveOutcome, load_with_fallback, save_with_fallback};
pub use stats::SessionStats;
pub use strategy::BettingStrategy;
