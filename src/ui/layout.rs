//! Screen layout and status bar

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{InputKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the main area and a one-row status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        let color = match app.state.current_view {
            View::Confirmation => Color::Green,
            View::Form if app.engine.is_valid() => Color::Green,
            View::Form => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " Esc:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view and focused input
fn get_view_hints(app: &App) -> String {
    if app.state.current_error().is_some() {
        return "Enter/Esc:dismiss".to_string();
    }
    match app.state.current_view {
        View::Confirmation => "Enter:register another  Esc:quit".to_string(),
        View::Form => {
            let form = &app.state.form;
            let field_hint = match form.active().map(|f| &f.input) {
                None => "←/→:choose  Enter:press",
                Some(InputKind::Radio(_) | InputKind::Select(_)) => "←/→:choose",
                Some(InputKind::Checkbox) => "Space:toggle",
                Some(InputKind::Multiline) => "Enter:newline",
                Some(InputKind::Date) => "type YYYY-MM-DD",
                Some(InputKind::File) => "type a file path",
                Some(InputKind::Text | InputKind::Secret) => "type to edit",
            };
            format!(
                "Tab:next  {field_hint}  {SUBMIT_SHORTCUT}:register  {RESET_SHORTCUT}:reset"
            )
        }
    }
}
