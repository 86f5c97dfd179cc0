//! The read-only guard: strip or reject protected keys in a write payload.
//!
//! The payload is mutated in place. In raise mode fields are processed in
//! declared order and the pass stops at the first protected key present:
//! only that key is reported, and keys declared after it are never looked
//! at. The payload is left as it was at the point of the stop.

use serde_json::Value;

use crate::error::{FieldGuardError, Result};
use crate::policy::ReadOnlyPolicy;

/// What a successful pass did to the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardOutcome {
    /// Protected keys that were present and removed, in declared order.
    pub stripped: Vec<String>,
}

/// Apply `policy` for `model` to an in-flight payload.
///
/// `None` or a JSON `null` means the request carried no body; nothing to
/// sanitize, whatever the policy. Bodies
/// that are not JSON objects have no own keys and pass through unchanged
/// unless the whole model is read-only.
pub fn apply(model: &str, policy: &ReadOnlyPolicy, body: Option<&mut Value>) -> Result<GuardOutcome> {
    let body = match body {
        None | Some(Value::Null) => return Ok(GuardOutcome::default()),
        Some(b) => b,
    };

    let mut outcome = GuardOutcome::default();

    match &policy.fields {
        Some(fields) => {
            tracing::debug!(model, ?fields, "read only properties found");
            let Value::Object(map) = body else {
                return Ok(outcome);
            };
            for field in fields {
                if policy.raise_error && map.contains_key(field) {
                    return Err(FieldGuardError::ReadOnlyField {
                        model: model.to_string(),
                        field: field.clone(),
                    });
                }
                if map.remove(field).is_some() {
                    outcome.stripped.push(field.clone());
                }
            }
            Ok(outcome)
        }
        None if policy.raise_error => Err(FieldGuardError::ReadOnlyModel {
            model: model.to_string(),
        }),
        None => Ok(outcome),
    }
}

/// Optional per-model capability: a model with the read-only mixin applied
/// exposes one of these; a model without it does not.
pub trait ReadOnlyGuard: Send + Sync {
    /// Resolve the live policy of `model` and apply it to `body`.
    fn strip_read_only_properties(&self, model: &str, body: Option<&mut Value>) -> Result<GuardOutcome>;
}
