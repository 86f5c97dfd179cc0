use serde::Deserialize;

/// Relation kinds as spelled in model config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    HasMany,
    HasOne,
    HasManyThrough,
    HasAndBelongsToMany,
    BelongsTo,
    ReferencesMany,
    EmbedsOne,
    EmbedsMany,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::HasMany => "hasMany",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasManyThrough => "hasManyThrough",
            RelationKind::HasAndBelongsToMany => "hasAndBelongsToMany",
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::ReferencesMany => "referencesMany",
            RelationKind::EmbedsOne => "embedsOne",
            RelationKind::EmbedsMany => "embedsMany",
        }
    }

    /// Ownership relations (`has*`): writes through them reach the related model.
    pub fn is_has(self) -> bool {
        self.as_str().starts_with("has")
    }
}

/// One declared relation of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub name: String,
    pub kind: RelationKind,
    /// Related model name.
    pub model: String,
}

impl RelationDescriptor {
    pub fn new(name: impl Into<String>, kind: RelationKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            model: model.into(),
        }
    }
}
