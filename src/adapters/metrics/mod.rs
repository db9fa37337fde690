//! Metrics Adapters
//!
//! Prometheus counters and gauges fed from settlement events, rendered
//! with the text exposition format.

pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
