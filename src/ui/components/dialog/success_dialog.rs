//! Confirmation shown after an accepted registration

use super::base::{render_dialog, DialogConfig};
use crate::state::label_for;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};
use regform::submission::Submission;

/// Render the success dialog with a summary of the submitted values.
/// Fields listed in `masked` are shown masked.
pub fn render_success_dialog(frame: &mut Frame, submission: &Submission, masked: &[String]) {
    let details = submission
        .masked_values(masked)
        .iter()
        .map(|(name, value)| {
            let shown = value.to_string();
            let shown = if shown.is_empty() {
                "-".to_string()
            } else {
                shown
            };
            (label_for(name), shown)
        })
        .collect();

    let message = format!(
        "Thank you for registering.\nReference {} at {}",
        submission.id,
        submission.submitted_at.format("%Y-%m-%d %H:%M UTC")
    );

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter", key_style),
        Span::raw(" register another  "),
        Span::styled("Esc", key_style),
        Span::raw(" quit"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Registration Successful!",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            details,
            hint: Some(hint),
            max_width: 72,
        },
    );
}
