//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_error_dialog, render_notice_dialog};
use ratatui::{layout::Rect, Frame};

/// Main draw function. Returns the area of the form itself, which is what gets printed.
pub fn draw(frame: &mut Frame, app: &App) -> Rect {
    let (main_area, status_area) = layout::create_layout(frame.area());

    let form_area = forms::draw_admission_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Dialogs go on top; errors before the success notice
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    } else if let Some(notice) = &app.state.notice {
        render_notice_dialog(frame, notice);
    }

    form_area
}
