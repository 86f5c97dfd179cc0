//! Before-operation hook pipeline.
//!
//! Re-exports the hook registry and the hook trait so downstream consumers
//! can depend on this module directly.

pub mod hooks;

pub use hooks::{BeforeHook, HookRegistry, RemoteContext};
