//! Mutating operation identifiers.
//!
//! Each operation renders to the method string the host registers hooks
//! under (`create`, `prototype.patchAttributes`,
//! `prototype.__updateById__items`, ...). The set is closed: a new mutating
//! entry point on the host needs a new variant here and a registration in
//! the read-only mixin.

use std::fmt;

const RELATION_UPDATE_PREFIX: &str = "prototype.__updateById__";

/// A mutating entry point on a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Upsert,
    ReplaceOrCreate,
    PatchOrCreate,
    /// `prototype.updateAttributes`
    UpdateAttributes,
    /// `prototype.patchAttributes` (synonym of `UpdateAttributes`)
    PatchAttributes,
    UpdateAll,
    UpsertWithWhere,
    ReplaceById,
    /// Update one related instance by id through the named relation.
    UpdateRelatedById(String),
}

impl Operation {
    /// Operations intercepted directly on a model carrying the read-only mixin.
    pub const MODEL_WRITES: [Operation; 9] = [
        Operation::Create,
        Operation::Upsert,
        Operation::ReplaceOrCreate,
        Operation::PatchOrCreate,
        Operation::UpdateAttributes,
        Operation::PatchAttributes,
        Operation::UpdateAll,
        Operation::UpsertWithWhere,
        Operation::ReplaceById,
    ];

    pub fn update_related(relation: impl Into<String>) -> Self {
        Operation::UpdateRelatedById(relation.into())
    }

    /// Method string used as the hook key.
    pub fn method_string(&self) -> String {
        match self {
            Operation::Create => "create".into(),
            Operation::Upsert => "upsert".into(),
            Operation::ReplaceOrCreate => "replaceOrCreate".into(),
            Operation::PatchOrCreate => "patchOrCreate".into(),
            Operation::UpdateAttributes => "prototype.updateAttributes".into(),
            Operation::PatchAttributes => "prototype.patchAttributes".into(),
            Operation::UpdateAll => "updateAll".into(),
            Operation::UpsertWithWhere => "upsertWithWhere".into(),
            Operation::ReplaceById => "replaceById".into(),
            Operation::UpdateRelatedById(rel) => format!("{RELATION_UPDATE_PREFIX}{rel}"),
        }
    }

    /// Relation name for relationship-traversal writes.
    pub fn relation(&self) -> Option<&str> {
        match self {
            Operation::UpdateRelatedById(rel) => Some(rel),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.method_string())
    }
}
