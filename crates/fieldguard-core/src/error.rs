//! Shared error type across fieldguard crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A write touched a read-only field or a read-only model.
    ReadOnly,
    /// Model name not present in the registry.
    ModelNotFound,
    /// Relation name not declared on the addressed model.
    RelationNotFound,
    /// Invalid input / malformed body or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ReadOnly => "READONLY_ERROR",
            ErrorCode::ModelNotFound => "MODEL_NOT_FOUND",
            ErrorCode::RelationNotFound => "RELATION_NOT_FOUND",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// HTTP-style status the host surfaces for this code.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCode::ReadOnly => 403,
            ErrorCode::ModelNotFound | ErrorCode::RelationNotFound => 404,
            ErrorCode::BadRequest | ErrorCode::UnsupportedVersion => 400,
            ErrorCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FieldGuardError>;

/// Unified error type used by core and host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldGuardError {
    #[error("Unable to update: {model}.{field} is read only.")]
    ReadOnlyField { model: String, field: String },
    #[error("Unable to update: {model} is read only.")]
    ReadOnlyModel { model: String },
    #[error("model not found: {0}")]
    UnknownModel(String),
    #[error("relation not found: {model}.{relation}")]
    UnknownRelation { model: String, relation: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl FieldGuardError {
    /// Map internal error to a stable client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            FieldGuardError::ReadOnlyField { .. } | FieldGuardError::ReadOnlyModel { .. } => {
                ErrorCode::ReadOnly
            }
            FieldGuardError::UnknownModel(_) => ErrorCode::ModelNotFound,
            FieldGuardError::UnknownRelation { .. } => ErrorCode::RelationNotFound,
            FieldGuardError::BadRequest(_) => ErrorCode::BadRequest,
            FieldGuardError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            FieldGuardError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }

    /// True for the 403 read-only violations raised by the guard.
    pub fn is_read_only(&self) -> bool {
        self.code() == ErrorCode::ReadOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_messages_are_stable() {
        let field = FieldGuardError::ReadOnlyField {
            model: "Order".into(),
            field: "total".into(),
        };
        assert_eq!(field.to_string(), "Unable to update: Order.total is read only.");
        assert_eq!(field.status_code(), 403);
        assert_eq!(field.code().as_str(), "READONLY_ERROR");

        let model = FieldGuardError::ReadOnlyModel { model: "Account".into() };
        assert_eq!(model.to_string(), "Unable to update: Account is read only.");
        assert!(model.is_read_only());
    }

    #[test]
    fn lookup_failures_are_not_found() {
        let err = FieldGuardError::UnknownModel("Ghost".into());
        assert_eq!(err.status_code(), 404);
        assert!(!err.is_read_only());
    }
}
