//! Pure validation of form values against a schema

use super::schema::{FieldSpec, FormSchema};
use super::value::{ErrorState, FieldValue, FormValues};

/// Initial values for every field of the schema
pub fn initial_values(schema: &FormSchema) -> FormValues {
    FormValues::from_entries(
        schema
            .fields()
            .iter()
            .map(|f| (f.name().to_string(), f.kind().empty_value()))
            .collect(),
    )
}

/// First failing rule's message for one field, in declaration order
pub fn validate_field<'a>(
    spec: &'a FieldSpec,
    value: &FieldValue,
    values: &FormValues,
) -> Option<&'a str> {
    spec.rules()
        .iter()
        .find(|rule| !rule.passes(value, values))
        .map(|rule| rule.message())
}

/// Validate every field. The result has exactly the schema's keys.
pub fn validate(schema: &FormSchema, values: &FormValues) -> ErrorState {
    ErrorState::from_entries(
        schema
            .fields()
            .iter()
            .map(|spec| {
                let error = values
                    .get(spec.name())
                    .and_then(|value| validate_field(spec, value, values))
                    .map(str::to_string);
                (spec.name().to_string(), error)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldDef, RuleDef};
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema::builder()
            .field(
                FieldDef::text("password")
                    .rule(RuleDef::required("Password is required"))
                    .rule(RuleDef::min_length(6, "Password must be at least 6 characters")),
            )
            .field(
                FieldDef::text("confirmPassword")
                    .rule(RuleDef::equals_field("password", "Passwords must match"))
                    .rule(RuleDef::required("Confirm Password is required")),
            )
            .build()
            .unwrap()
    }

    fn values(password: &str, confirm: &str) -> FormValues {
        FormValues::from_entries(vec![
            ("password".to_string(), FieldValue::text(password)),
            ("confirmPassword".to_string(), FieldValue::text(confirm)),
        ])
    }

    #[test]
    fn test_initial_values_cover_schema() {
        let schema = schema();
        let initial = initial_values(&schema);
        let names: Vec<_> = initial.names().collect();
        assert_eq!(names, schema.names().collect::<Vec<_>>());
        assert!(initial.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = schema();
        let errors = validate(&schema, &values("", ""));
        assert_eq!(errors.message("password"), Some("Password is required"));
        // equalsField passes on two empty values, so required reports
        assert_eq!(
            errors.message("confirmPassword"),
            Some("Confirm Password is required")
        );
    }

    #[test]
    fn test_declaration_order_decides_message() {
        let schema = schema();
        let errors = validate(&schema, &values("abc", "xyz"));
        assert_eq!(
            errors.message("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.message("confirmPassword"), Some("Passwords must match"));
    }

    #[test]
    fn test_all_valid() {
        let schema = schema();
        let errors = validate(&schema, &values("abc123", "abc123"));
        assert!(!errors.has_errors());
        assert_eq!(errors.len(), 2);
    }
}
