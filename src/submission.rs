//! Success callback for accepted submissions

use crate::form::{FieldValue, FormValues};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const MASK: &str = "********";

/// Immutable snapshot handed to the success callback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
}

impl Submission {
    pub fn new(values: FormValues) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            values,
        }
    }

    /// Copy of the values with the named text fields replaced by a mask
    pub fn masked_values(&self, masked: &[String]) -> FormValues {
        FormValues::from_entries(
            self.values
                .iter()
                .map(|(name, value)| {
                    let value = match value {
                        FieldValue::Text(s) if !s.is_empty() && masked.iter().any(|m| m == name) => {
                            FieldValue::text(MASK)
                        }
                        other => other.clone(),
                    };
                    (name.to_string(), value)
                })
                .collect(),
        )
    }
}

/// Receives every accepted submission, exactly once
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    fn on_submit(&mut self, submission: &Submission);
}

/// Logs accepted submissions and remembers the most recent one
#[derive(Debug, Default)]
pub struct LoggingSubmitHandler {
    masked_fields: Vec<String>,
    last: Option<Submission>,
}

impl LoggingSubmitHandler {
    pub fn new(masked_fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            masked_fields: masked_fields.into_iter().map(Into::into).collect(),
            last: None,
        }
    }

    /// Fields whose text is masked in logs and summaries
    pub fn masked_fields(&self) -> &[String] {
        &self.masked_fields
    }

    pub fn last(&self) -> Option<&Submission> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl SubmitHandler for LoggingSubmitHandler {
    fn on_submit(&mut self, submission: &Submission) {
        let masked = submission.masked_values(&self.masked_fields);
        match serde_json::to_string(&masked) {
            Ok(data) => tracing::info!(
                submission_id = %submission.id,
                submitted_at = %submission.submitted_at,
                %data,
                "Form data"
            ),
            Err(e) => tracing::warn!(
                submission_id = %submission.id,
                "Could not serialize form data: {e}"
            ),
        }
        self.last = Some(submission.clone());
    }
}
