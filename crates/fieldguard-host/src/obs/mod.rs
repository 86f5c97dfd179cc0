//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics and rendered by the `/metrics` handler in
//! the Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, GuardMetrics};
