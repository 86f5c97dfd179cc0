//! Policy layer: resolve a model's read-only policy from its live settings.

pub mod resolver;

pub use resolver::resolve_policy;
