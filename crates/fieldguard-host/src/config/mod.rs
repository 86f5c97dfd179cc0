//! Model config loader (strict parsing).

pub mod schema;

use std::fs;

use fieldguard_core::error::{FieldGuardError, Result};

pub use schema::{AppConfig, MixinsConfig, ModelConfig, RelationConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FieldGuardError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| FieldGuardError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
