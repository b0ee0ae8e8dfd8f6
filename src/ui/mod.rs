//! UI module for rendering the TUI

mod components;
mod contact;
mod forms;
mod layout;

use crate::app::App;
use crate::state::SubmissionState;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area);

    // The success panel stands in for the form until the reset fires
    match app.submission_state() {
        SubmissionState::Submitted => contact::draw_success(frame, main_area, app),
        SubmissionState::Idle | SubmissionState::Submitting => {
            contact::draw_form(frame, main_area, app)
        }
    }

    layout::draw_status_bar(frame, status_area, app);

    // Toasts float above everything else
    components::render_toasts(frame, &app.notifications);
}
