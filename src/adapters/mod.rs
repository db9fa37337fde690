//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure (RNG, file I/O, Prometheus).
//!
//! Adapter categories:
//! - `dice`: fair and scripted dice sources
//! - `metrics`: Prometheus metrics fed from settlement events
//! - `persistence`: JSON file and in-memory snapshot stores

pub mod dice;
pub mod metrics;
pub mod persistence;
