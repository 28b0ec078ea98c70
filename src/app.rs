//! Application state and core logic

use crate::platform::RESET_MODIFIER;
use crate::state::{AppState, Form, FormButton, InputKind, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regform::config::AppConfig;
use regform::form::registration::SECRET_FIELDS;
use regform::form::{FileHandle, FormEngine, FormSchema, SubmitOutcome};
use regform::submission::LoggingSubmitHandler;
use std::io;
use std::path::Path;

/// Direction of a focus move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Next,
    Prev,
    To(usize),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Validation engine for the form session
    pub engine: FormEngine,
    /// Receives accepted submissions
    pub submissions: LoggingSubmitHandler,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let schema = config.build_schema()?;
        Ok(Self::with_schema(schema))
    }

    pub fn with_schema(schema: FormSchema) -> Self {
        let state = AppState::new(&schema);
        Self {
            state,
            engine: FormEngine::new(schema),
            submissions: LoggingSubmitHandler::new(SECRET_FIELDS),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // An open error dialog swallows keys until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Confirmation => self.handle_confirmation_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_buttons = self.state.form.is_buttons_row_active();
        let input = self.state.form.active().map(|f| f.input.clone());

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit()?;
            }
            KeyCode::Char('r') if key.modifiers.contains(RESET_MODIFIER) => self.reset(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(Focus::Next)?,
            KeyCode::BackTab | KeyCode::Up => self.move_focus(Focus::Prev)?,

            // Buttons row
            KeyCode::Left | KeyCode::Right if on_buttons => {
                self.state.form.selected_button = self.state.form.selected_button.toggle();
            }
            KeyCode::Enter if on_buttons => match self.state.form.selected_button {
                FormButton::Register => self.submit()?,
                FormButton::Reset => self.reset(),
            },

            // Choice and checkbox fields
            KeyCode::Left if matches!(input, Some(InputKind::Radio(_) | InputKind::Select(_))) => {
                if let Some(field) = self.state.form.active_mut() {
                    field.prev_option();
                }
                self.apply_active()?;
            }
            KeyCode::Right if matches!(input, Some(InputKind::Radio(_) | InputKind::Select(_))) => {
                if let Some(field) = self.state.form.active_mut() {
                    field.next_option();
                }
                self.apply_active()?;
            }
            KeyCode::Char(' ') if input == Some(InputKind::Checkbox) => {
                if let Some(field) = self.state.form.active_mut() {
                    field.toggle();
                }
                self.apply_active()?;
            }

            // Text entry
            KeyCode::Enter if input == Some(InputKind::Multiline) => {
                if let Some(field) = self.state.form.active_mut() {
                    field.push_char('\n');
                }
                self.apply_active()?;
            }
            KeyCode::Enter => self.move_focus(Focus::Next)?,
            KeyCode::Char(c)
                if self.state.form.active().is_some_and(|f| f.accepts_text())
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                if let Some(field) = self.state.form.active_mut() {
                    field.push_char(c);
                }
                // File handles are resolved once the path is complete
                if input != Some(InputKind::File) {
                    self.apply_active()?;
                }
            }
            KeyCode::Backspace if self.state.form.active().is_some_and(|f| f.accepts_text()) => {
                if let Some(field) = self.state.form.active_mut() {
                    field.pop_char();
                }
                if input != Some(InputKind::File) {
                    self.apply_active()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_confirmation_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => self.reset(),
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Push the active field's input into the engine
    fn apply_active(&mut self) -> Result<()> {
        if let Some(field) = self.state.form.active() {
            self.engine.set_field_value(&field.name, field.to_value())?;
        }
        Ok(())
    }

    /// Resolve the typed path of the active file field into a handle
    fn commit_file(&mut self) -> Result<()> {
        let Some(field) = self.state.form.active() else {
            return Ok(());
        };
        let name = field.name.clone();
        let path = field.buffer().trim().to_string();
        let value = field.to_value();
        if !path.is_empty() {
            if let Err(err) = FileHandle::from_path(Path::new(&path)) {
                tracing::warn!("Cannot attach {path}: {err}");
                let reason = if err.kind() == io::ErrorKind::NotFound {
                    "file not found"
                } else {
                    "not a regular file"
                };
                self.push_error(format!("Cannot attach {path}: {reason}"));
            }
        }
        self.engine.set_field_value(&name, value)?;
        Ok(())
    }

    /// Blur the active field, then move focus
    fn move_focus(&mut self, focus: Focus) -> Result<()> {
        let active = self
            .state
            .form
            .active()
            .map(|f| (f.name.clone(), f.input == InputKind::File));
        match active {
            Some((_, true)) => self.commit_file()?,
            Some((name, false)) => self.engine.set_field_touched(&name)?,
            None => {}
        }

        match focus {
            Focus::Next => self.state.form.next_field(),
            Focus::Prev => self.state.form.prev_field(),
            Focus::To(index) => self.state.form.set_active_field(index),
        }
        Ok(())
    }

    /// Attempt a submit; on rejection focus the first invalid field
    pub fn submit(&mut self) -> Result<()> {
        if self
            .state
            .form
            .active()
            .is_some_and(|f| f.input == InputKind::File)
        {
            self.commit_file()?;
        }

        match self.engine.submit(&mut self.submissions) {
            SubmitOutcome::Accepted(submission) => {
                tracing::info!(submission_id = %submission.id, "Registration accepted");
                self.state.current_view = View::Confirmation;
                self.state.status_message = Some("Registration Successful!".to_string());
            }
            SubmitOutcome::Rejected(errors) => {
                let count = errors.error_count();
                if let Some(index) = errors
                    .first_error()
                    .and_then(|(name, _)| self.state.form.index_of(name))
                {
                    self.move_focus(Focus::To(index))?;
                }
                let noun = if count == 1 { "field needs" } else { "fields need" };
                self.state.status_message = Some(format!("{count} {noun} attention"));
            }
        }
        Ok(())
    }

    /// Clear the form for a new registration
    pub fn reset(&mut self) {
        self.engine.reset();
        self.state.reset_form();
        self.submissions.clear();
        self.state.status_message = None;
        tracing::debug!("Form reset");
    }
}
