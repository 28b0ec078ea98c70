//! Registration form navigation state

use super::field::FormField;
use regform::form::FormSchema;

/// Buttons on the buttons row, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Register,
    Reset,
}

impl FormButton {
    pub const ALL: [FormButton; 2] = [FormButton::Register, FormButton::Reset];

    pub fn label(&self) -> &'static str {
        match self {
            FormButton::Register => "Register",
            FormButton::Reset => "Reset",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            FormButton::Register => FormButton::Reset,
            FormButton::Reset => FormButton::Register,
        }
    }
}

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Input fields of a schema plus a trailing buttons row
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    pub selected_button: FormButton,
}

impl RegistrationForm {
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            fields: schema.fields().iter().map(FormField::for_spec).collect(),
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn active(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Clear every input and go back to the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
        self.selected_button = FormButton::default();
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1 // buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }
}
