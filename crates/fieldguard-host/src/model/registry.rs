use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use dashmap::DashMap;

use fieldguard_core::error::{FieldGuardError, Result};
use fieldguard_core::guard::ReadOnlyGuard;
use fieldguard_core::policy::ReadOnlySettings;

use crate::config::ModelConfig;

use super::relation::RelationDescriptor;

/// A registered model: name, relations, live read-only settings, and the
/// guard capability once the read-only mixin is attached.
pub struct ModelHandle {
    name: String,
    relations: Vec<RelationDescriptor>,
    read_only: RwLock<Option<ReadOnlySettings>>,
    guard: OnceLock<Arc<dyn ReadOnlyGuard>>,
    attached: AtomicBool,
}

impl ModelHandle {
    pub fn new(
        name: impl Into<String>,
        relations: Vec<RelationDescriptor>,
        read_only: Option<ReadOnlySettings>,
    ) -> Self {
        Self {
            name: name.into(),
            relations,
            read_only: RwLock::new(read_only),
            guard: OnceLock::new(),
            attached: AtomicBool::new(false),
        }
    }

    pub fn from_config(cfg: &ModelConfig) -> Self {
        let relations = cfg
            .relations
            .iter()
            .map(|(name, rel)| RelationDescriptor::new(name.clone(), rel.kind, rel.model.clone()))
            .collect();
        Self::new(cfg.name.clone(), relations, cfg.mixins.read_only_settings())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relations(&self) -> &[RelationDescriptor] {
        &self.relations
    }

    pub fn relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Current read-only settings; `None` when the mixin is not configured.
    pub fn read_only_settings(&self) -> Result<Option<ReadOnlySettings>> {
        self.read_only
            .read()
            .map(|g| (*g).clone())
            .map_err(|_| FieldGuardError::Internal(format!("settings lock poisoned: {}", self.name)))
    }

    /// Replace the read-only settings. Takes effect on the next request.
    pub fn set_read_only(&self, settings: Option<ReadOnlySettings>) -> Result<()> {
        let mut g = self
            .read_only
            .write()
            .map_err(|_| FieldGuardError::Internal(format!("settings lock poisoned: {}", self.name)))?;
        *g = settings;
        Ok(())
    }

    /// Guard capability, present only on models with the read-only mixin.
    pub fn read_only_guard(&self) -> Option<Arc<dyn ReadOnlyGuard>> {
        self.guard.get().cloned()
    }

    pub fn install_read_only_guard(&self, guard: Arc<dyn ReadOnlyGuard>) -> Result<()> {
        self.guard.set(guard).map_err(|_| {
            FieldGuardError::Internal(format!("read only guard already installed: {}", self.name))
        })
    }

    /// Flip the attached flag. Returns false if the model was already attached.
    pub(crate) fn mark_attached(&self) -> bool {
        self.attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("name", &self.name)
            .field("relations", &self.relations)
            .field("has_read_only_guard", &self.guard.get().is_some())
            .finish()
    }
}

/// Model lookup by name.
#[derive(Default)]
pub struct ModelRegistry {
    models: DashMap<String, Arc<ModelHandle>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: DashMap::new(),
        }
    }

    pub fn register(&self, model: ModelHandle) -> Result<Arc<ModelHandle>> {
        let name = model.name().to_string();
        if self.models.contains_key(&name) {
            return Err(FieldGuardError::BadRequest(format!("model already registered: {name}")));
        }
        let handle = Arc::new(model);
        self.models.insert(name, Arc::clone(&handle));
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Result<Arc<ModelHandle>> {
        self.models
            .get(name)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| FieldGuardError::UnknownModel(name.to_string()))
    }
}
