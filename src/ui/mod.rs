//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    if app.state.session.is_submitted() {
        forms::draw_submitted(frame, main_area, app);
    } else {
        forms::draw_content_form(frame, main_area, app);
    }

    layout::draw_status_bar(frame, app);

    // Errors are modal and drawn over everything else
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error, app.state.pending_errors());
    }
}
