//! Application state definitions

use super::forms::RegistrationForm;
use regform::form::FormSchema;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    /// Shown after an accepted submission
    Confirmation,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub current_view: View,
    pub form: RegistrationForm,

    // UI state
    pub status_message: Option<String>,
    /// Errors waiting to be shown, oldest first
    pub error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            current_view: View::default(),
            form: RegistrationForm::new(schema),
            status_message: None,
            error_queue: VecDeque::new(),
        }
    }

    /// Queue an error message for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Back to an empty form
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.current_view = View::Form;
    }
}
