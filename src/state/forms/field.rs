//! Form field input state

use chrono::NaiveDate;
use regform::form::registration::{
    ADDRESS, CONFIRM_PASSWORD, COUNTRY, DATE_OF_BIRTH, EMAIL, FULL_NAME, GENDER, PASSWORD, PHONE,
    PROFILE_PICTURE, TERMS,
};
use regform::form::{FieldKind, FieldSpec, FieldValue, FileHandle, RuleDef};
use std::path::Path;

/// Date format typed into date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a fully typed `YYYY-MM-DD` date
const DATE_INPUT_LEN: usize = 10;

/// How a field takes input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Multiline,
    Secret,
    Date,
    /// All options shown inline
    Radio(Vec<String>),
    /// One option shown, cycled with Left/Right
    Select(Vec<String>),
    Checkbox,
    File,
}

/// Input state of a single field: what the user has typed or picked
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    pub required: bool,
    buffer: String,
    selected: Option<usize>,
    checked: bool,
}

impl FormField {
    /// Build the input for a schema field
    pub fn for_spec(spec: &FieldSpec) -> Self {
        let name = spec.name();
        let choices = spec.rules().iter().find_map(|r| match r.def() {
            RuleDef::OneOf { values, .. } if spec.kind() == FieldKind::Text => {
                Some(values.iter().map(ToString::to_string).collect::<Vec<_>>())
            }
            _ => None,
        });

        let input = match (spec.kind(), choices) {
            (FieldKind::Boolean, _) => InputKind::Checkbox,
            (FieldKind::Date, _) => InputKind::Date,
            (FieldKind::File, _) => InputKind::File,
            (FieldKind::Text, Some(options)) if name == GENDER => InputKind::Radio(options),
            (FieldKind::Text, Some(options)) => InputKind::Select(options),
            (FieldKind::Text, None) if name == ADDRESS => InputKind::Multiline,
            (FieldKind::Text, None) if name == PASSWORD || name == CONFIRM_PASSWORD => {
                InputKind::Secret
            }
            (FieldKind::Text, None) => InputKind::Text,
        };

        Self {
            name: name.to_string(),
            label: label_for(name),
            input,
            required: spec.is_required(),
            buffer: String::new(),
            selected: None,
            checked: false,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.input == InputKind::Multiline
    }

    /// Whether typed characters go into the buffer
    pub fn accepts_text(&self) -> bool {
        matches!(
            self.input,
            InputKind::Text
                | InputKind::Multiline
                | InputKind::Secret
                | InputKind::Date
                | InputKind::File
        )
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn options(&self) -> &[String] {
        match &self.input {
            InputKind::Radio(options) | InputKind::Select(options) => options,
            _ => &[],
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if self.accepts_text() {
            self.buffer.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.buffer.pop();
    }

    /// Pick the next option, wrapping around
    pub fn next_option(&mut self) {
        let count = self.options().len();
        if count > 0 {
            self.selected = Some(self.selected.map_or(0, |i| (i + 1) % count));
        }
    }

    /// Pick the previous option, wrapping around
    pub fn prev_option(&mut self) {
        let count = self.options().len();
        if count > 0 {
            self.selected = Some(match self.selected {
                Some(0) | None => count - 1,
                Some(i) => i - 1,
            });
        }
    }

    pub fn toggle(&mut self) {
        if self.input == InputKind::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.selected = None;
        self.checked = false;
    }

    /// Typed date that does not parse
    pub fn has_malformed_date(&self) -> bool {
        self.input == InputKind::Date && !self.buffer.is_empty() && self.parsed_date().is_none()
    }

    /// The buffer as a zero-padded `YYYY-MM-DD` date; partial input is rejected
    fn parsed_date(&self) -> Option<NaiveDate> {
        let text = self.buffer.trim();
        if text.len() != DATE_INPUT_LEN {
            return None;
        }
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    }

    /// The engine value for the current input.
    ///
    /// Unparseable dates and missing files map to the empty value so the
    /// field's rules report them.
    pub fn to_value(&self) -> FieldValue {
        match &self.input {
            InputKind::Text | InputKind::Multiline | InputKind::Secret => {
                FieldValue::text(self.buffer.clone())
            }
            InputKind::Date => FieldValue::Date(self.parsed_date()),
            InputKind::Radio(options) | InputKind::Select(options) => FieldValue::text(
                self.selected
                    .and_then(|i| options.get(i).cloned())
                    .unwrap_or_default(),
            ),
            InputKind::Checkbox => FieldValue::Bool(self.checked),
            InputKind::File => {
                let path = self.buffer.trim();
                if path.is_empty() {
                    FieldValue::File(None)
                } else {
                    FieldValue::File(FileHandle::from_path(Path::new(path)).ok())
                }
            }
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.input {
            InputKind::Secret => "•".repeat(self.buffer.chars().count()),
            InputKind::Radio(options) => options
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    let mark = if self.selected == Some(i) { "(•)" } else { "( )" };
                    format!("{mark} {o}")
                })
                .collect::<Vec<_>>()
                .join("  "),
            InputKind::Select(options) => match self.selected.and_then(|i| options.get(i)) {
                Some(option) => format!("◀ {option} ▶"),
                None => "◀ Select an option ▶".to_string(),
            },
            InputKind::Checkbox => {
                let mark = if self.checked { "[x]" } else { "[ ]" };
                format!("{mark} I accept the terms and conditions")
            }
            InputKind::Text | InputKind::Multiline | InputKind::Date | InputKind::File => {
                self.buffer.clone()
            }
        }
    }

    /// Placeholder shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self.input {
            InputKind::Date => "YYYY-MM-DD",
            InputKind::File => "path to file (optional)",
            _ => "(empty)",
        }
    }
}

/// Display label for a field
pub fn label_for(name: &str) -> String {
    let known = match name {
        FULL_NAME => Some("Full Name"),
        EMAIL => Some("Email"),
        PHONE => Some("Phone Number"),
        DATE_OF_BIRTH => Some("Date of Birth"),
        GENDER => Some("Gender"),
        PASSWORD => Some("Password"),
        CONFIRM_PASSWORD => Some("Confirm Password"),
        ADDRESS => Some("Address"),
        COUNTRY => Some("Country"),
        PROFILE_PICTURE => Some("Profile Picture (Optional)"),
        TERMS => Some("Terms"),
        _ => None,
    };
    known.map(str::to_string).unwrap_or_else(|| humanize(name))
}

/// `dateOfBirth` -> `Date Of Birth`, `first_name` -> `First Name`
fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut word_start = true;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !out.ends_with(' ') && !out.is_empty() {
                out.push(' ');
            }
            word_start = true;
            continue;
        }
        if c.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
            word_start = true;
        }
        if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
