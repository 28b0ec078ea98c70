//! Form input layer
//!
//! Holds what the user has typed or picked for each schema field. Values
//! flow into the engine; the engine owns validation.

mod field;
mod form_state;

pub use field::{label_for, FormField, InputKind};
pub use form_state::{Form, FormButton, RegistrationForm};
