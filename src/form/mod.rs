//! Declarative form validation
//!
//! - `schema` / `rule`: schema-as-data, compiled and checked at construction
//! - `validate`: pure validation of values against a schema
//! - `engine`: stateful shell tracking values, touched flags and errors
//! - `registration`: the registration form itself

mod engine;
mod error;
pub mod registration;
mod rule;
mod schema;
mod validate;
mod value;

pub use engine::{FormEngine, SubmitOutcome};
pub use error::{FormError, SchemaError};
pub use registration::{registration_schema, RegistrationOptions};
pub use rule::{Choice, Rule, RuleDef};
pub use schema::{FieldDef, FieldSpec, FormSchema, SchemaBuilder, SchemaDef};
pub use validate::{initial_values, validate, validate_field};
pub use value::{ErrorState, FieldKind, FieldMap, FieldValue, FileHandle, FormValues, TouchedState};
