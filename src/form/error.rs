//! Programmer errors raised by schema construction and engine calls.
//!
//! User input failures are never errors; they live in [`ErrorState`](super::ErrorState).

use super::value::FieldKind;
use thiserror::Error;

/// Why a schema was rejected at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema has no fields")]
    Empty,

    #[error("duplicate field name `{0}`")]
    DuplicateField(String),

    #[error("field `{field}` references unknown field `{target}`")]
    DanglingReference { field: String, target: String },

    #[error("field `{0}` references itself")]
    SelfReference(String),

    #[error("field `{field}` has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("rule `{rule}` cannot apply to {kind} field `{field}`")]
    RuleKindMismatch {
        field: String,
        rule: &'static str,
        kind: FieldKind,
    },

    #[error("field `{0}` has an empty oneOf set")]
    EmptyChoices(String),

    #[error("schema could not be parsed: {0}")]
    Parse(String),
}

/// Errors returned by [`FormEngine`](super::FormEngine) and schema construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    #[error("field `{field}` expects a {expected} value, got {found}")]
    KindMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_wraps_into_form_error() {
        let err: FormError = SchemaError::DuplicateField("email".to_string()).into();
        assert!(matches!(err, FormError::InvalidSchema(_)));
        assert_eq!(
            err.to_string(),
            "invalid schema: duplicate field name `email`"
        );
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = FormError::KindMismatch {
            field: "terms".to_string(),
            expected: FieldKind::Boolean,
            found: FieldKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "field `terms` expects a boolean value, got text"
        );
    }
}
