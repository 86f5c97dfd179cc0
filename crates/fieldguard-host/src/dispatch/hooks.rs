use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use fieldguard_core::error::Result;
use fieldguard_core::operation::Operation;

/// Per-invocation context handed to hooks. The body is owned by this one
/// in-flight request; hooks mutate it in place.
#[derive(Debug)]
pub struct RemoteContext {
    model: String,
    method: String,
    pub body: Option<Value>,
}

impl RemoteContext {
    pub fn new(model: impl Into<String>, operation: Operation, body: Option<Value>) -> Self {
        Self {
            model: model.into(),
            method: operation.method_string(),
            body,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn into_body(self) -> Option<Value> {
        self.body
    }
}

/// Runs before a named operation. Returning `Err` halts the pipeline and the
/// underlying operation never runs.
#[async_trait]
pub trait BeforeHook: Send + Sync {
    async fn before(&self, ctx: &mut RemoteContext) -> Result<()>;
}

/// `(model, method) -> hooks` in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: DashMap<(String, String), Vec<Arc<dyn BeforeHook>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: DashMap::new(),
        }
    }

    pub fn before(&self, model: &str, method: &str, hook: Arc<dyn BeforeHook>) {
        tracing::debug!(model, method, "before hook registered");
        self.hooks
            .entry((model.to_string(), method.to_string()))
            .or_insert_with(Vec::new)
            .push(hook);
    }

    /// Snapshot of the hooks for one operation (no map guard held across awaits).
    pub fn hooks_for(&self, model: &str, method: &str) -> Vec<Arc<dyn BeforeHook>> {
        self.hooks
            .get(&(model.to_string(), method.to_string()))
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    pub fn count(&self, model: &str, method: &str) -> usize {
        self.hooks
            .get(&(model.to_string(), method.to_string()))
            .map(|r| r.value().len())
            .unwrap_or(0)
    }

    /// All method strings with at least one hook for `model`.
    pub fn registered_methods(&self, model: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .hooks
            .iter()
            .filter(|e| e.key().0 == model)
            .map(|e| e.key().1.clone())
            .collect();
        out.sort();
        out
    }

    /// Run the hooks for the context's model and method, stopping at the first error.
    pub async fn run(&self, ctx: &mut RemoteContext) -> Result<()> {
        for hook in self.hooks_for(ctx.model(), ctx.method()) {
            hook.before(ctx).await?;
        }
        Ok(())
    }
}
