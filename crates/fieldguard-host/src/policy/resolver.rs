use fieldguard_core::error::Result;
use fieldguard_core::policy::ReadOnlyPolicy;

use crate::model::ModelRegistry;

/// Look up `model` and normalize its current read-only settings.
///
/// An unknown model name is a configuration error and surfaces as the
/// registry's `UnknownModel`. Nothing is cached: every call reads the live
/// settings.
pub fn resolve_policy(registry: &ModelRegistry, model: &str) -> Result<ReadOnlyPolicy> {
    let handle = registry.get(model)?;
    let settings = handle.read_only_settings()?;
    Ok(ReadOnlyPolicy::resolve(settings.as_ref()))
}

#[cfg(test)]
mod tests {
    use fieldguard_core::policy::ReadOnlySettings;

    use super::*;
    use crate::model::ModelHandle;

    #[test]
    fn resolves_live_settings() {
        let registry = ModelRegistry::new();
        let order = registry
            .register(ModelHandle::new("Order", vec![], Some(ReadOnlySettings::strip("total"))))
            .unwrap();

        let p = resolve_policy(&registry, "Order").unwrap();
        assert_eq!(p.fields, Some(vec!["total".to_string()]));

        order.set_read_only(Some(ReadOnlySettings::whole_model())).unwrap();
        let p = resolve_policy(&registry, "Order").unwrap();
        assert_eq!(p.fields, None);
        assert!(p.raise_error);
    }

    #[test]
    fn unknown_model_propagates() {
        let registry = ModelRegistry::new();
        let err = resolve_policy(&registry, "Ghost").unwrap_err();
        assert_eq!(err.code().as_str(), "MODEL_NOT_FOUND");
    }
}
