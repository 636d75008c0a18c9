//! # errorcache-observability
//!
//! Tracing subscriber setup, span macros, named structured events, and the
//! atomic counters behind `Repository::metrics()`.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
