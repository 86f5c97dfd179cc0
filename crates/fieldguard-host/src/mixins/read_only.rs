//! ReadOnly mixin.
//!
//! On attach, a model with `mixins.ReadOnly` gets:
//! - a `ModelGuard` installed as its read-only capability,
//! - a before hook on each direct mutating operation that runs the guard
//!   with the model's own name,
//! - a before hook on `prototype.__updateById__<rel>` for each `has*`
//!   relation, delegating to the related model's guard when it has one.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use fieldguard_core::error::Result;
use fieldguard_core::guard::{self, GuardOutcome, ReadOnlyGuard};
use fieldguard_core::operation::Operation;

use crate::app::ModelApp;
use crate::dispatch::{BeforeHook, RemoteContext};
use crate::model::{ModelHandle, ModelRegistry};
use crate::obs::GuardMetrics;
use crate::policy::resolve_policy;

use super::Mixin;

/// Read-only capability backed by the model registry. The policy is
/// resolved from the target model's live settings on every call.
pub struct ModelGuard {
    registry: Arc<ModelRegistry>,
    metrics: Arc<GuardMetrics>,
}

impl ModelGuard {
    pub fn new(registry: Arc<ModelRegistry>, metrics: Arc<GuardMetrics>) -> Self {
        Self { registry, metrics }
    }
}

impl ReadOnlyGuard for ModelGuard {
    fn strip_read_only_properties(&self, model: &str, body: Option<&mut Value>) -> Result<GuardOutcome> {
        if matches!(body.as_deref(), None | Some(Value::Null)) {
            return Ok(GuardOutcome::default());
        }

        let policy = resolve_policy(&self.registry, model)?;
        match guard::apply(model, &policy, body) {
            Ok(outcome) => {
                for field in &outcome.stripped {
                    tracing::debug!(model, field = %field, "read only property removed from incoming data");
                    self.metrics
                        .fields_stripped
                        .inc(&[("model", model), ("field", field.as_str())]);
                }
                Ok(outcome)
            }
            Err(e) => {
                tracing::info!(model, error = %e, "write rejected");
                self.metrics.rejections.inc(&[("model", model)]);
                Err(e)
            }
        }
    }
}

/// Before hook for a direct mutating operation on the guarded model.
struct ModelWriteHook {
    model: String,
    guard: Arc<dyn ReadOnlyGuard>,
    metrics: Arc<GuardMetrics>,
}

#[async_trait]
impl BeforeHook for ModelWriteHook {
    async fn before(&self, ctx: &mut RemoteContext) -> Result<()> {
        tracing::debug!(model = %self.model, method = ctx.method(), "strip read only properties");
        self.metrics
            .interceptions
            .inc(&[("model", self.model.as_str()), ("method", ctx.method())]);
        self.guard
            .strip_read_only_properties(&self.model, ctx.body.as_mut())
            .map(|_| ())
    }
}

/// One compiled relation propagation entry, fixed at attach time.
#[derive(Debug, Clone)]
pub struct RelationRoute {
    pub relation: String,
    pub target_model: String,
    pub operation: Operation,
    target: Arc<ModelHandle>,
}

impl RelationRoute {
    pub fn target(&self) -> &Arc<ModelHandle> {
        &self.target
    }
}

/// Before hook for `prototype.__updateById__<rel>`: sanitize with the
/// related model's guard, if it has one.
struct RelationUpdateHook {
    route: RelationRoute,
    metrics: Arc<GuardMetrics>,
}

#[async_trait]
impl BeforeHook for RelationUpdateHook {
    async fn before(&self, ctx: &mut RemoteContext) -> Result<()> {
        self.metrics
            .interceptions
            .inc(&[("model", ctx.model()), ("method", ctx.method())]);

        let Some(guard) = self.route.target().read_only_guard() else {
            tracing::debug!(
                model = ctx.model(),
                relation = %self.route.relation,
                target = %self.route.target_model,
                "related model has no read only guard"
            );
            self.metrics.relation_passthrough.inc(&[
                ("model", ctx.model()),
                ("relation", self.route.relation.as_str()),
            ]);
            return Ok(());
        };

        tracing::debug!(
            model = ctx.model(),
            method = ctx.method(),
            target = %self.route.target_model,
            "strip read only properties through relation"
        );
        guard
            .strip_read_only_properties(&self.route.target_model, ctx.body.as_mut())
            .map(|_| ())
    }
}

/// Collect propagation routes for the `has*` relations of `model`.
///
/// Related models are resolved now; an unresolvable target fails attach.
pub fn compile_relation_routes(
    registry: &ModelRegistry,
    model: &ModelHandle,
) -> Result<Vec<RelationRoute>> {
    let mut routes = Vec::new();
    for rel in model.relations().iter().filter(|r| r.kind.is_has()) {
        let target = registry.get(&rel.model)?;
        routes.push(RelationRoute {
            relation: rel.name.clone(),
            target_model: rel.model.clone(),
            operation: Operation::update_related(rel.name.clone()),
            target,
        });
    }
    Ok(routes)
}

#[derive(Default)]
pub struct ReadOnlyMixin;

impl ReadOnlyMixin {
    pub fn new() -> Self {
        Self
    }
}

impl Mixin for ReadOnlyMixin {
    fn name(&self) -> &'static str {
        "ReadOnly"
    }

    fn applies_to(&self, model: &ModelHandle) -> Result<bool> {
        Ok(model.read_only_settings()?.is_some())
    }

    fn attached(&self, app: &ModelApp, model: &Arc<ModelHandle>) -> Result<()> {
        tracing::debug!(model = model.name(), "ReadOnly mixin attached");

        let guard: Arc<dyn ReadOnlyGuard> = Arc::new(ModelGuard::new(
            Arc::clone(app.registry()),
            Arc::clone(app.metrics()),
        ));
        model.install_read_only_guard(Arc::clone(&guard))?;

        // Direct mutating operations.
        for op in Operation::MODEL_WRITES.iter() {
            app.hooks().before(
                model.name(),
                &op.method_string(),
                Arc::new(ModelWriteHook {
                    model: model.name().to_string(),
                    guard: Arc::clone(&guard),
                    metrics: Arc::clone(app.metrics()),
                }),
            );
        }

        // Updates via relationship.
        for route in compile_relation_routes(app.registry(), model)? {
            tracing::debug!(
                model = model.name(),
                relation = %route.relation,
                target = %route.target_model,
                "read only propagated through relation"
            );
            let method = route.operation.method_string();
            app.hooks().before(
                model.name(),
                &method,
                Arc::new(RelationUpdateHook {
                    route,
                    metrics: Arc::clone(app.metrics()),
                }),
            );
        }

        Ok(())
    }
}
