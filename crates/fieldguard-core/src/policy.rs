//! Read-only policy configuration and resolution.
//!
//! `ReadOnlySettings` is the raw per-model mixin configuration as it appears
//! in model config (`mixins.ReadOnly`). `ReadOnlyPolicy` is the normalized
//! form the guard consumes. Normalization runs on every request against the
//! model's live settings; nothing here is cached.

use serde::Deserialize;

/// `fields` accepts either a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    One(String),
    Many(Vec<String>),
}

impl FieldList {
    /// Normalize to a list. A single empty name or an empty list counts as
    /// no fields; a non-empty list is kept as declared.
    pub fn into_vec(self) -> Option<Vec<String>> {
        match self {
            FieldList::One(s) if s.is_empty() => None,
            FieldList::One(s) => Some(vec![s]),
            FieldList::Many(v) if v.is_empty() => None,
            FieldList::Many(v) => Some(v),
        }
    }
}

impl From<&str> for FieldList {
    fn from(s: &str) -> Self {
        FieldList::One(s.to_string())
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(v: Vec<&str>) -> Self {
        FieldList::Many(v.into_iter().map(str::to_string).collect())
    }
}

/// Options of the ReadOnly mixin (`mixins.ReadOnly: { fields, raiseError }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadOnlySettings {
    #[serde(default)]
    pub fields: Option<FieldList>,
    #[serde(default, rename = "raiseError")]
    pub raise_error: Option<bool>,
}

impl ReadOnlySettings {
    pub fn strip(fields: impl Into<FieldList>) -> Self {
        Self {
            fields: Some(fields.into()),
            raise_error: None,
        }
    }

    pub fn raise(fields: impl Into<FieldList>) -> Self {
        Self {
            fields: Some(fields.into()),
            raise_error: Some(true),
        }
    }

    /// Whole model read-only: no fields, raise on every write.
    pub fn whole_model() -> Self {
        Self {
            fields: None,
            raise_error: Some(true),
        }
    }
}

/// `mixins.ReadOnly` accepts `true`/`false` or an options object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReadOnlyMixinConfig {
    Enabled(bool),
    Options(ReadOnlySettings),
}

impl ReadOnlyMixinConfig {
    /// Settings when the mixin is applied, `None` when switched off.
    pub fn settings(&self) -> Option<ReadOnlySettings> {
        match self {
            ReadOnlyMixinConfig::Enabled(true) => Some(ReadOnlySettings::default()),
            ReadOnlyMixinConfig::Enabled(false) => None,
            ReadOnlyMixinConfig::Options(s) => Some(s.clone()),
        }
    }
}

/// Normalized policy for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOnlyPolicy {
    /// Protected fields in declared order; `None` when nothing is declared.
    pub fields: Option<Vec<String>>,
    pub raise_error: bool,
}

impl ReadOnlyPolicy {
    /// Resolve from live settings. Absent settings resolve to the inert policy.
    pub fn resolve(settings: Option<&ReadOnlySettings>) -> Self {
        let Some(s) = settings else {
            return Self::default();
        };
        Self {
            fields: s.fields.clone().and_then(FieldList::into_vec),
            raise_error: s.raise_error.unwrap_or(false),
        }
    }

    pub fn is_inert(&self) -> bool {
        self.fields.is_none() && !self.raise_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_is_wrapped() {
        let p = ReadOnlyPolicy::resolve(Some(&ReadOnlySettings::strip("total")));
        assert_eq!(p.fields, Some(vec!["total".to_string()]));
        assert!(!p.raise_error);
    }

    #[test]
    fn empty_list_means_no_fields() {
        let p = ReadOnlyPolicy::resolve(Some(&ReadOnlySettings::raise(Vec::<&str>::new())));
        assert_eq!(p.fields, None);
        assert!(p.raise_error);
    }

    #[test]
    fn list_of_empty_names_is_still_a_field_list() {
        let p = ReadOnlyPolicy::resolve(Some(&ReadOnlySettings::raise(vec![""])));
        assert_eq!(p.fields, Some(vec![String::new()]));

        let p = ReadOnlyPolicy::resolve(Some(&ReadOnlySettings::raise("")));
        assert_eq!(p.fields, None);
    }

    #[test]
    fn absent_settings_are_inert() {
        assert!(ReadOnlyPolicy::resolve(None).is_inert());
        assert!(ReadOnlyPolicy::resolve(Some(&ReadOnlySettings::default())).is_inert());
    }

    #[test]
    fn mixin_flag_forms() {
        assert_eq!(
            ReadOnlyMixinConfig::Enabled(true).settings(),
            Some(ReadOnlySettings::default())
        );
        assert_eq!(ReadOnlyMixinConfig::Enabled(false).settings(), None);
    }
}
