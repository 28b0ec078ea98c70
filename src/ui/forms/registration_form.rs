//! Registration form view

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::FormButton;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Width of each button on the buttons row
const BUTTON_WIDTH: u16 = 16;

/// Draw the registration form
pub fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let border_color = if app.engine.submit_count() > 0 && !app.engine.is_valid() {
        Color::Red
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(" Registration Form ")
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
        .split(inner);

    draw_fields(frame, chunks[0], app);
    draw_buttons(frame, chunks[1], app);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    if form.fields.is_empty() {
        return;
    }

    let errors: Vec<Option<&str>> = form
        .fields
        .iter()
        .map(|f| app.engine.visible_error(&f.name))
        .collect();
    let heights: Vec<u16> = form
        .fields
        .iter()
        .zip(&errors)
        .map(|(f, e)| field_height(f, e.is_some()))
        .collect();

    // Keep the last field in view while the buttons row is focused
    let anchor = form.active_field_index.min(form.fields.len() - 1);
    let (start, end) = visible_window(&heights, anchor, area.height);

    let mut y = area.y;
    for index in start..end {
        let height = heights[index];
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        }
        .intersection(area);
        draw_field(
            frame,
            field_area,
            &form.fields[index],
            index == form.active_field_index,
            errors[index],
        );
        y += height;
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let focused = form.is_buttons_row_active();

    let mut constraints: Vec<Constraint> = FormButton::ALL
        .iter()
        .map(|_| Constraint::Length(BUTTON_WIDTH))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (button, chunk) in FormButton::ALL.iter().zip(chunks.iter()) {
        render_button(
            frame,
            *chunk,
            button.label(),
            *button == form.selected_button,
            focused,
        );
    }
}

/// Range of fields that fit in `available` rows with `active` in view.
///
/// Scrolls only as far as needed: fields are shown from the top until the
/// active one would fall below the fold.
fn visible_window(heights: &[u16], active: usize, available: u16) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    let mut used: u16 = heights[..=active].iter().sum();
    while used > available && start < active {
        used -= heights[start];
        start += 1;
    }

    let mut end = active + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_everything_fits() {
        assert_eq!(visible_window(&[3, 3, 3], 0, 20), (0, 3));
    }

    #[test]
    fn test_window_starts_at_top_while_active_fits() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 1, 7), (0, 2));
    }

    #[test]
    fn test_window_scrolls_to_active() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 3, 7), (2, 4));
    }

    #[test]
    fn test_error_lines_take_space() {
        assert_eq!(visible_window(&[4, 4, 3], 2, 8), (1, 3));
    }

    #[test]
    fn test_active_taller_than_area_still_shown() {
        assert_eq!(visible_window(&[3, 5], 1, 2), (1, 2));
    }

    #[test]
    fn test_active_out_of_range_is_clamped() {
        assert_eq!(visible_window(&[3, 3], 9, 3), (1, 2));
    }

    #[test]
    fn test_empty() {
        assert_eq!(visible_window(&[], 0, 10), (0, 0));
    }
}
