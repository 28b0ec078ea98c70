//! Stateful form engine: values, touched flags and errors over a schema

use super::error::FormError;
use super::schema::FormSchema;
use super::validate::{initial_values, validate, validate_field};
use super::value::{ErrorState, FieldValue, FormValues, TouchedState};
use crate::submission::{SubmitHandler, Submission};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed; the handler received this snapshot
    Accepted(Submission),
    /// At least one field failed; the handler was not called
    Rejected(ErrorState),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Owns the state of one form session.
///
/// Values, touched flags and errors always carry exactly the schema's
/// field names. Changing a field revalidates it and every field whose
/// rules reference it; submit revalidates everything.
#[derive(Debug, Clone)]
pub struct FormEngine {
    schema: FormSchema,
    values: FormValues,
    touched: TouchedState,
    errors: ErrorState,
    submit_count: u32,
}

impl FormEngine {
    pub fn new(schema: FormSchema) -> Self {
        let values = initial_values(&schema);
        let errors = validate(&schema, &values);
        let touched = TouchedState::from_entries(
            schema.names().map(|n| (n.to_string(), false)).collect(),
        );
        Self {
            schema,
            values,
            touched,
            errors,
            submit_count: 0,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    fn index_of(&self, name: &str) -> Result<usize, FormError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Overwrite a field's value. The field counts as touched afterwards.
    pub fn set_field_value(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let index = self.index_of(name)?;
        let expected = self.schema.fields()[index].kind();
        if value.kind() != expected {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected,
                found: value.kind(),
            });
        }

        tracing::trace!(field = name, "Field value changed");
        self.values.set_index(index, value);
        self.touched.set_index(index, true);
        self.revalidate(index);
        let dependents = self.schema.dependents_of(index).to_vec();
        for dependent in dependents {
            self.revalidate(dependent);
        }
        Ok(())
    }

    /// Mark a field as touched, typically when it loses focus
    pub fn set_field_touched(&mut self, name: &str) -> Result<(), FormError> {
        let index = self.index_of(name)?;
        self.touched.set_index(index, true);
        self.revalidate(index);
        Ok(())
    }

    /// Validate the whole form. On success the handler is invoked exactly
    /// once with a snapshot of the values.
    pub fn submit(&mut self, handler: &mut dyn SubmitHandler) -> SubmitOutcome {
        self.submit_count += 1;
        self.touched = TouchedState::from_entries(
            self.schema.names().map(|n| (n.to_string(), true)).collect(),
        );
        self.errors = validate(&self.schema, &self.values);

        if self.errors.has_errors() {
            tracing::debug!(
                errors = self.errors.error_count(),
                attempt = self.submit_count,
                "Submit rejected"
            );
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        let submission = Submission::new(self.values.clone());
        tracing::debug!(submission_id = %submission.id, "Submit accepted");
        handler.on_submit(&submission);
        SubmitOutcome::Accepted(submission)
    }

    /// Back to initial values with nothing touched
    pub fn reset(&mut self) {
        *self = Self::new(self.schema.clone());
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    pub fn touched_state(&self) -> &TouchedState {
        &self.touched
    }

    pub fn is_valid(&self) -> bool {
        !self.errors.has_errors()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// The error the UI may show: gated on the field being touched or a
    /// submit having been attempted
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.submit_count > 0 || self.touched(name) {
            self.errors.message(name)
        } else {
            None
        }
    }

    fn revalidate(&mut self, index: usize) {
        let spec = &self.schema.fields()[index];
        let error = self
            .values
            .get_index(index)
            .and_then(|value| validate_field(spec, value, &self.values))
            .map(str::to_string);
        self.errors.set_index(index, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldDef, RuleDef, SchemaError};
    use crate::submission::MockSubmitHandler;
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema::builder()
            .field(FieldDef::text("fullName").rule(RuleDef::required("Full Name is required")))
            .field(
                FieldDef::text("password")
                    .rule(RuleDef::required("Password is required"))
                    .rule(RuleDef::min_length(6, "Password must be at least 6 characters")),
            )
            .field(
                FieldDef::text("confirmPassword")
                    .rule(RuleDef::required("Confirm Password is required"))
                    .rule(RuleDef::equals_field("password", "Passwords must match")),
            )
            .field(FieldDef::file("profilePicture"))
            .field(
                FieldDef::boolean("terms")
                    .rule(RuleDef::one_of([true], "You must accept the terms and conditions")),
            )
            .build()
            .unwrap()
    }

    /// Handler that accepts any number of calls
    fn accept_any() -> MockSubmitHandler {
        let mut mock = MockSubmitHandler::new();
        mock.expect_on_submit().return_const(());
        mock
    }

    fn fill_valid(engine: &mut FormEngine) {
        engine
            .set_field_value("fullName", FieldValue::text("Jane Doe"))
            .unwrap();
        engine
            .set_field_value("password", FieldValue::text("abc123"))
            .unwrap();
        engine
            .set_field_value("confirmPassword", FieldValue::text("abc123"))
            .unwrap();
        engine
            .set_field_value("terms", FieldValue::Bool(true))
            .unwrap();
    }

    mod state {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_key_sets_match_schema() {
            let engine = FormEngine::new(schema());
            let names: Vec<_> = engine.schema().names().collect();
            assert_eq!(engine.values().names().collect::<Vec<_>>(), names);
            assert_eq!(engine.touched_state().names().collect::<Vec<_>>(), names);
            assert_eq!(engine.errors().names().collect::<Vec<_>>(), names);
        }

        #[test]
        fn test_initial_state() {
            let engine = FormEngine::new(schema());
            assert!(!engine.is_valid());
            assert_eq!(engine.submit_count(), 0);
            assert_eq!(engine.value("terms"), Some(&FieldValue::Bool(false)));
            assert_eq!(engine.value("profilePicture"), Some(&FieldValue::File(None)));
            assert!(!engine.touched("fullName"));
        }

        #[test]
        fn test_errors_hidden_until_touched() {
            let mut engine = FormEngine::new(schema());
            assert_eq!(
                engine.errors().message("fullName"),
                Some("Full Name is required")
            );
            assert_eq!(engine.visible_error("fullName"), None);

            engine.set_field_touched("fullName").unwrap();
            assert!(engine.touched("fullName"));
            assert_eq!(
                engine.visible_error("fullName"),
                Some("Full Name is required")
            );
            assert_eq!(engine.visible_error("password"), None);
        }

        #[test]
        fn test_change_marks_touched() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("password", FieldValue::text("abc"))
                .unwrap();
            assert!(engine.touched("password"));
            assert_eq!(
                engine.visible_error("password"),
                Some("Password must be at least 6 characters")
            );
        }

        #[test]
        fn test_valid_value_clears_error() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("fullName", FieldValue::text("Jane"))
                .unwrap();
            assert_eq!(engine.errors().get("fullName"), Some(&None));
        }

        #[test]
        fn test_reset() {
            let mut engine = FormEngine::new(schema());
            fill_valid(&mut engine);
            engine.submit(&mut accept_any());
            engine.reset();
            assert_eq!(engine.submit_count(), 0);
            assert_eq!(engine.value("fullName"), Some(&FieldValue::text("")));
            assert!(!engine.touched("fullName"));
            assert_eq!(engine.visible_error("fullName"), None);
        }
    }

    mod cross_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_matching_confirmation() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("password", FieldValue::text("abc123"))
                .unwrap();
            engine
                .set_field_value("confirmPassword", FieldValue::text("abc123"))
                .unwrap();
            assert_eq!(engine.errors().message("confirmPassword"), None);

            engine
                .set_field_value("confirmPassword", FieldValue::text("xyz"))
                .unwrap();
            assert_eq!(
                engine.errors().message("confirmPassword"),
                Some("Passwords must match")
            );
        }

        #[test]
        fn test_changing_referenced_field_revalidates_dependent() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("password", FieldValue::text("abc123"))
                .unwrap();
            engine
                .set_field_value("confirmPassword", FieldValue::text("abc123"))
                .unwrap();
            engine
                .set_field_value("password", FieldValue::text("abc1234"))
                .unwrap();
            assert_eq!(
                engine.errors().message("confirmPassword"),
                Some("Passwords must match")
            );

            engine
                .set_field_value("password", FieldValue::text("abc123"))
                .unwrap();
            assert_eq!(engine.errors().message("confirmPassword"), None);
        }

        #[test]
        fn test_terms_one_of() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("terms", FieldValue::Bool(false))
                .unwrap();
            assert_eq!(
                engine.errors().message("terms"),
                Some("You must accept the terms and conditions")
            );
            engine
                .set_field_value("terms", FieldValue::Bool(true))
                .unwrap();
            assert_eq!(engine.errors().message("terms"), None);
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_submit_calls_handler_once() {
            let mut engine = FormEngine::new(schema());
            fill_valid(&mut engine);

            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .withf(|s| {
                    s.values.get("fullName") == Some(&FieldValue::text("Jane Doe"))
                        && s.values.get("password") == Some(&FieldValue::text("abc123"))
                        && s.values.get("terms") == Some(&FieldValue::Bool(true))
                })
                .times(1)
                .return_const(());

            let outcome = engine.submit(&mut handler);
            assert!(outcome.is_accepted());
            assert!(engine.is_valid());
            if let SubmitOutcome::Accepted(submission) = outcome {
                assert_eq!(&submission.values, engine.values());
            }
        }

        #[test]
        fn test_snapshot_carries_last_value_per_field() {
            let mut engine = FormEngine::new(schema());
            fill_valid(&mut engine);
            engine
                .set_field_value("fullName", FieldValue::text("J"))
                .unwrap();
            engine
                .set_field_value("fullName", FieldValue::text("Janet"))
                .unwrap();

            let mut handler = MockSubmitHandler::new();
            handler
                .expect_on_submit()
                .withf(|s| s.values.get("fullName") == Some(&FieldValue::text("Janet")))
                .times(1)
                .return_const(());
            assert!(engine.submit(&mut handler).is_accepted());
        }

        #[test]
        fn test_invalid_submit_touches_all_and_skips_handler() {
            let mut engine = FormEngine::new(schema());
            engine
                .set_field_value("fullName", FieldValue::text("Jane"))
                .unwrap();

            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().times(0);

            let outcome = engine.submit(&mut handler);
            assert!(!engine.is_valid());
            assert!(engine.schema().names().all(|n| engine.touched(n)));

            let SubmitOutcome::Rejected(errors) = outcome else {
                panic!("expected rejection");
            };
            assert_eq!(errors.len(), engine.schema().len());
            assert_eq!(errors.message("fullName"), None);
            assert_eq!(errors.message("password"), Some("Password is required"));
            assert_eq!(
                errors.message("terms"),
                Some("You must accept the terms and conditions")
            );
            assert_eq!(
                engine.visible_error("confirmPassword"),
                Some("Confirm Password is required")
            );
        }

        #[test]
        fn test_optional_file_field_never_blocks() {
            let mut engine = FormEngine::new(schema());
            fill_valid(&mut engine);
            assert_eq!(engine.errors().message("profilePicture"), None);
            assert!(engine.submit(&mut accept_any()).is_accepted());
        }

        #[test]
        fn test_resubmit_after_fixing() {
            let mut engine = FormEngine::new(schema());
            let mut handler = MockSubmitHandler::new();
            handler.expect_on_submit().times(1).return_const(());

            assert!(!engine.submit(&mut handler).is_accepted());
            fill_valid(&mut engine);
            assert!(engine.submit(&mut handler).is_accepted());
            assert_eq!(engine.submit_count(), 2);
        }
    }

    mod contract {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unknown_field_on_change() {
            let mut engine = FormEngine::new(schema());
            let err = engine
                .set_field_value("nickname", FieldValue::text("jd"))
                .unwrap_err();
            assert_eq!(err, FormError::UnknownField("nickname".to_string()));
        }

        #[test]
        fn test_unknown_field_on_touch() {
            let mut engine = FormEngine::new(schema());
            let err = engine.set_field_touched("nickname").unwrap_err();
            assert_eq!(err, FormError::UnknownField("nickname".to_string()));
        }

        #[test]
        fn test_kind_mismatch_leaves_state_untouched() {
            let mut engine = FormEngine::new(schema());
            let err = engine
                .set_field_value("terms", FieldValue::text("yes"))
                .unwrap_err();
            assert!(matches!(err, FormError::KindMismatch { .. }));
            assert_eq!(engine.value("terms"), Some(&FieldValue::Bool(false)));
            assert!(!engine.touched("terms"));
        }

        #[test]
        fn test_duplicate_schema_fails_before_validation() {
            let err = FormSchema::builder()
                .field(FieldDef::text("email"))
                .field(FieldDef::text("email"))
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                FormError::InvalidSchema(SchemaError::DuplicateField(_))
            ));
        }
    }
}
