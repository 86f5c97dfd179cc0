//! fieldguard core: read-only field policy, the guard, operation ids, errors.
//!
//! This crate carries no runtime or transport dependencies. The host layer
//! (model registry, hook pipeline, HTTP surface) lives in `fieldguard-host`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible
//! paths surface as `FieldGuardError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod guard;
pub mod operation;
pub mod policy;

/// Shared result type.
pub use error::{ErrorCode, FieldGuardError, Result};
pub use guard::{apply, GuardOutcome, ReadOnlyGuard};
pub use operation::Operation;
pub use policy::{FieldList, ReadOnlyMixinConfig, ReadOnlyPolicy, ReadOnlySettings};
