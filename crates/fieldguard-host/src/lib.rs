//! fieldguard host library entry.
//!
//! This crate wires config, the model registry, the before-hook pipeline,
//! the read-only mixin, and the HTTP remoting surface into one stack. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app;
pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod mixins;
pub mod model;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod transport;

pub use app::ModelApp;
