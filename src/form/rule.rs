//! Validation rules: the serializable definitions and their compiled form

use super::error::SchemaError;
use super::value::{FieldKind, FieldValue, FormValues};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// HTML living-standard email grammar
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid regex")
});

/// An allowed value for a `oneOf` rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Bool(bool),
    Text(String),
}

impl Choice {
    fn matches(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Choice::Bool(a), FieldValue::Bool(b)) => a == b,
            (Choice::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            Choice::Bool(_) => FieldKind::Boolean,
            Choice::Text(_) => FieldKind::Text,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Bool(b) => write!(f, "{b}"),
            Choice::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Choice::Text(value.to_string())
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Choice::Text(value)
    }
}

impl From<bool> for Choice {
    fn from(value: bool) -> Self {
        Choice::Bool(value)
    }
}

/// Declarative rule as written in a schema. `message` falls back to a
/// generated default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleDef {
    Required {
        message: Option<String>,
    },
    StringMatch {
        pattern: String,
        message: Option<String>,
    },
    EmailFormat {
        message: Option<String>,
    },
    MinLength {
        min: usize,
        message: Option<String>,
    },
    EqualsField {
        field: String,
        message: Option<String>,
    },
    OneOf {
        values: Vec<Choice>,
        message: Option<String>,
    },
}

impl RuleDef {
    pub fn required(message: impl Into<String>) -> Self {
        RuleDef::Required {
            message: Some(message.into()),
        }
    }

    pub fn string_match(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        RuleDef::StringMatch {
            pattern: pattern.into(),
            message: Some(message.into()),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        RuleDef::EmailFormat {
            message: Some(message.into()),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        RuleDef::MinLength {
            min,
            message: Some(message.into()),
        }
    }

    pub fn equals_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        RuleDef::EqualsField {
            field: field.into(),
            message: Some(message.into()),
        }
    }

    pub fn one_of<C: Into<Choice>>(
        values: impl IntoIterator<Item = C>,
        message: impl Into<String>,
    ) -> Self {
        RuleDef::OneOf {
            values: values.into_iter().map(Into::into).collect(),
            message: Some(message.into()),
        }
    }

    /// Name of the rule kind as it appears in schema files
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuleDef::Required { .. } => "required",
            RuleDef::StringMatch { .. } => "stringMatch",
            RuleDef::EmailFormat { .. } => "emailFormat",
            RuleDef::MinLength { .. } => "minLength",
            RuleDef::EqualsField { .. } => "equalsField",
            RuleDef::OneOf { .. } => "oneOf",
        }
    }

    /// Compile for a field of the given name and kind. Cross-field targets
    /// are checked by the schema, which knows every field.
    pub(crate) fn compile(&self, field: &str, kind: FieldKind) -> Result<Rule, SchemaError> {
        let text_only = matches!(
            self,
            RuleDef::StringMatch { .. } | RuleDef::EmailFormat { .. } | RuleDef::MinLength { .. }
        );
        if text_only && kind != FieldKind::Text {
            return Err(SchemaError::RuleKindMismatch {
                field: field.to_string(),
                rule: self.kind_name(),
                kind,
            });
        }

        let (check, message) = match self {
            RuleDef::Required { message } => (
                Check::Required,
                or_default(message, || format!("{field} is a required field")),
            ),
            RuleDef::StringMatch { pattern, message } => {
                let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                    field: field.to_string(),
                    reason: e.to_string(),
                })?;
                (
                    Check::StringMatch(re),
                    or_default(message, || {
                        format!("{field} must match the following: \"{pattern}\"")
                    }),
                )
            }
            RuleDef::EmailFormat { message } => (
                Check::EmailFormat,
                or_default(message, || format!("{field} must be a valid email")),
            ),
            RuleDef::MinLength { min, message } => (
                Check::MinLength(*min),
                or_default(message, || {
                    format!("{field} must be at least {min} characters")
                }),
            ),
            RuleDef::EqualsField {
                field: other,
                message,
            } => (
                Check::EqualsField(other.clone()),
                or_default(message, || format!("{field} must match {other}")),
            ),
            RuleDef::OneOf { values, message } => {
                if values.is_empty() {
                    return Err(SchemaError::EmptyChoices(field.to_string()));
                }
                if let Some(bad) = values.iter().find(|c| c.kind() != kind) {
                    return Err(SchemaError::RuleKindMismatch {
                        field: field.to_string(),
                        rule: "oneOf",
                        kind: bad.kind(),
                    });
                }
                (
                    Check::OneOf(values.clone()),
                    or_default(message, || {
                        let list = values
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("{field} must be one of the following values: {list}")
                    }),
                )
            }
        };

        Ok(Rule {
            def: self.clone(),
            check,
            message,
        })
    }
}

fn or_default(message: &Option<String>, default: impl FnOnce() -> String) -> String {
    message.clone().unwrap_or_else(default)
}

#[derive(Debug, Clone)]
enum Check {
    Required,
    StringMatch(Regex),
    EmailFormat,
    MinLength(usize),
    EqualsField(String),
    OneOf(Vec<Choice>),
}

/// A compiled rule, ready to evaluate
#[derive(Debug, Clone)]
pub struct Rule {
    def: RuleDef,
    check: Check,
    message: String,
}

impl Rule {
    pub fn def(&self) -> &RuleDef {
        &self.def
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field this rule compares against, if it is a cross-field rule
    pub fn referenced_field(&self) -> Option<&str> {
        match &self.check {
            Check::EqualsField(other) => Some(other),
            _ => None,
        }
    }

    /// Whether `value` satisfies the rule given the rest of the form
    pub fn passes(&self, value: &FieldValue, values: &FormValues) -> bool {
        match &self.check {
            Check::Required => !value.is_empty(),
            Check::StringMatch(re) => match value.as_text() {
                Some(s) if !s.is_empty() => re.is_match(s),
                _ => true,
            },
            Check::EmailFormat => match value.as_text() {
                Some(s) if !s.is_empty() => EMAIL_RE.is_match(s),
                _ => true,
            },
            Check::MinLength(min) => value
                .as_text()
                .is_none_or(|s| s.chars().count() >= *min),
            Check::EqualsField(other) => values.get(other) == Some(value),
            Check::OneOf(choices) => choices.iter().any(|c| c.matches(value)),
        }
    }
}
