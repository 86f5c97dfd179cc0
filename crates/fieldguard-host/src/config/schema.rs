use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use serde::Deserialize;

use fieldguard_core::error::{FieldGuardError, Result};
use fieldguard_core::policy::{ReadOnlyMixinConfig, ReadOnlySettings};

use crate::model::RelationKind;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FieldGuardError::UnsupportedVersion);
        }
        if self.models.is_empty() {
            return Err(FieldGuardError::BadRequest("models must not be empty".into()));
        }

        self.server.validate()?;

        let mut names = HashSet::new();
        for m in &self.models {
            if m.name.is_empty() {
                return Err(FieldGuardError::BadRequest("model name must not be empty".into()));
            }
            if !names.insert(m.name.as_str()) {
                return Err(FieldGuardError::BadRequest(format!(
                    "duplicate model name: {}",
                    m.name
                )));
            }
        }

        for m in &self.models {
            for (rel_name, rel) in &m.relations {
                if rel_name.is_empty() {
                    return Err(FieldGuardError::BadRequest(format!(
                        "model {} declares a relation with an empty name",
                        m.name
                    )));
                }
                if !names.contains(rel.model.as_str()) {
                    return Err(FieldGuardError::BadRequest(format!(
                        "relation {}.{} targets undeclared model: {}",
                        m.name, rel_name, rel.model
                    )));
                }
                if let Some(through) = &rel.through {
                    if !names.contains(through.as_str()) {
                        return Err(FieldGuardError::BadRequest(format!(
                            "relation {}.{} goes through undeclared model: {}",
                            m.name, rel_name, through
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|e| {
            FieldGuardError::BadRequest(format!("server.listen must be a valid socket address: {e}"))
        })?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub name: String,
    #[serde(default)]
    pub mixins: MixinsConfig,
    #[serde(default)]
    pub relations: BTreeMap<String, RelationConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixinsConfig {
    #[serde(default, rename = "ReadOnly")]
    pub read_only: Option<ReadOnlyMixinConfig>,
}

impl MixinsConfig {
    /// Read-only settings when the mixin is applied to the model.
    pub fn read_only_settings(&self) -> Option<ReadOnlySettings> {
        self.read_only.as_ref().and_then(ReadOnlyMixinConfig::settings)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationConfig {
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub model: String,
    #[serde(default, rename = "foreignKey")]
    pub foreign_key: Option<String>,
    #[serde(default)]
    pub through: Option<String>,
}
