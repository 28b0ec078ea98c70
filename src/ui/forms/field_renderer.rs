//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a field box (borders + content)
pub const FIELD_HEIGHT: u16 = 3;

/// Rows taken by a multiline field box
pub const MULTILINE_FIELD_HEIGHT: u16 = 5;

/// Total rows a field needs, including its error line
pub fn field_height(field: &FormField, has_error: bool) -> u16 {
    let base = if field.is_multiline() {
        MULTILINE_FIELD_HEIGHT
    } else {
        FIELD_HEIGHT
    };
    base + u16::from(has_error)
}

/// Draw a form field and, below it, its error message
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let box_height = area.height.saturating_sub(u16::from(error.is_some()));
    let box_area = Rect {
        height: box_height,
        ..area
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let cursor = if is_active && field.accepts_text() {
        "▌"
    } else {
        ""
    };

    let mut lines: Vec<Line> = if display_value.is_empty() {
        let placeholder = if is_active { "" } else { field.placeholder() };
        vec![Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    };

    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        if field.has_malformed_date() {
            last.spans.push(Span::styled(
                "  (YYYY-MM-DD)",
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        box_area,
    );

    if let Some(message) = error {
        let error_area = Rect {
            y: area.y + box_height,
            height: 1,
            ..area
        };
        let line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(line, error_area);
    }
}

