//! Host model layer: model handles, relation metadata, and the registry.
//!
//! Handles are registered once at boot and shared via `Arc`. Relation
//! metadata is immutable; the read-only mixin settings stay live so a
//! reconfiguration is observed by the next request.

pub mod registry;
pub mod relation;

pub use registry::{ModelHandle, ModelRegistry};
pub use relation::{RelationDescriptor, RelationKind};
