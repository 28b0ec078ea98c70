//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_registration(frame, main_area, app);

    if app.state.current_view == View::Confirmation {
        if let Some(submission) = app.submissions.last() {
            components::render_success_dialog(
                frame,
                submission,
                app.submissions.masked_fields(),
            );
        }
    }

    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }

    layout::draw_status_bar(frame, status_area, app);
}
