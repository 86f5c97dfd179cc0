//! Model mixins: behavior attached to a model when it becomes ready.
//!
//! A mixin is notified once per model on the "attached" lifecycle event and
//! wires its hooks through the app's hook registry.

pub mod read_only;

use std::sync::Arc;

use fieldguard_core::error::Result;

use crate::app::ModelApp;
use crate::model::ModelHandle;

pub use read_only::{ModelGuard, ReadOnlyMixin, RelationRoute};

pub trait Mixin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the model's config applies this mixin.
    fn applies_to(&self, model: &ModelHandle) -> Result<bool>;

    /// Runs once per model, after every model is registered.
    fn attached(&self, app: &ModelApp, model: &Arc<ModelHandle>) -> Result<()>;
}
