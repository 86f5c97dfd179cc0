//! Model application: registry, hook pipeline, and the attach lifecycle.
//!
//! Boot is two-phase: every configured model is registered first, then each
//! model's mixins receive the "attached" notification in declaration order.
//! Relation targets are therefore resolvable no matter where they appear in
//! the config.

use std::sync::Arc;

use serde_json::Value;

use fieldguard_core::error::{FieldGuardError, Result};
use fieldguard_core::operation::Operation;

use crate::config::AppConfig;
use crate::dispatch::{HookRegistry, RemoteContext};
use crate::mixins::{Mixin, ReadOnlyMixin};
use crate::model::{ModelHandle, ModelRegistry};
use crate::obs::GuardMetrics;

pub struct ModelApp {
    registry: Arc<ModelRegistry>,
    hooks: HookRegistry,
    metrics: Arc<GuardMetrics>,
    mixins: Vec<Arc<dyn Mixin>>,
}

impl Default for ModelApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelApp {
    /// Empty app with the built-in mixins available.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ModelRegistry::new()),
            hooks: HookRegistry::new(),
            metrics: Arc::new(GuardMetrics::default()),
            mixins: vec![Arc::new(ReadOnlyMixin::new())],
        }
    }

    /// Register and attach every model in `cfg`.
    pub fn boot(cfg: &AppConfig) -> Result<Self> {
        let app = Self::new();

        let mut handles = Vec::with_capacity(cfg.models.len());
        for m in &cfg.models {
            handles.push(app.define(ModelHandle::from_config(m))?);
        }
        for h in &handles {
            app.attach(h)?;
        }

        tracing::info!(models = handles.len(), "models attached");
        Ok(app)
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn metrics(&self) -> &Arc<GuardMetrics> {
        &self.metrics
    }

    /// Register a model without attaching it.
    pub fn define(&self, model: ModelHandle) -> Result<Arc<ModelHandle>> {
        self.registry.register(model)
    }

    /// Emit the attached event for `model`. Runs at most once per model.
    pub fn attach(&self, model: &Arc<ModelHandle>) -> Result<()> {
        if !model.mark_attached() {
            return Err(FieldGuardError::Internal(format!(
                "model already attached: {}",
                model.name()
            )));
        }
        for mixin in &self.mixins {
            if mixin.applies_to(model)? {
                tracing::debug!(model = model.name(), mixin = mixin.name(), "applying mixin");
                mixin.attached(self, model)?;
            }
        }
        Ok(())
    }

    /// Run the before hooks of `operation` on `model` and return the body
    /// that would reach the operation. The first hook error aborts the call.
    pub async fn invoke(
        &self,
        model: &str,
        operation: Operation,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let handle = self.registry.get(model)?;
        if let Some(rel) = operation.relation() {
            if handle.relation(rel).is_none() {
                return Err(FieldGuardError::UnknownRelation {
                    model: model.to_string(),
                    relation: rel.to_string(),
                });
            }
        }

        let mut ctx = RemoteContext::new(handle.name(), operation, body);
        self.hooks.run(&mut ctx).await?;
        Ok(ctx.into_body())
    }
}
