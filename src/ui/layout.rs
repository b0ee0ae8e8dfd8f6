//! Layout components (header, status bar)

use crate::app::App;
use crate::state::SubmissionState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout: header, content, status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Section header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the section header
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "G E T   I N   T O U C H",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "Let's Build Something Exceptional",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Ready to elevate your digital presence? We'd love to hear from you.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission status
    let status = match app.submission_state() {
        SubmissionState::Idle => Span::styled(" ● ready ", Style::default().fg(Color::Green)),
        SubmissionState::Submitting => {
            Span::styled(" ◌ sending ", Style::default().fg(Color::Yellow))
        }
        SubmissionState::Submitted => Span::styled(" ✓ sent ", Style::default().fg(Color::Cyan)),
    };
    spans.push(status);

    // View-specific hints
    spans.push(Span::styled(
        get_hints(app.submission_state()),
        Style::default().fg(Color::Gray),
    ));

    // Endpoint
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("→ {}", app.controller.endpoint_name()),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current submission phase
fn get_hints(state: SubmissionState) -> &'static str {
    match state {
        SubmissionState::Idle => "Tab:next  Enter/^S:send  Esc:dismiss",
        SubmissionState::Submitting => "Tab:next  Esc:dismiss",
        SubmissionState::Submitted => "Esc:dismiss",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_header_and_status() {
        let (header, main, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 4);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
        assert_eq!(main.height, 19);
    }

    #[test]
    fn test_send_hint_only_when_idle() {
        assert!(get_hints(SubmissionState::Idle).contains("send"));
        assert!(!get_hints(SubmissionState::Submitting).contains("send"));
    }
}
