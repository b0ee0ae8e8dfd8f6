//! Contact section rendering (form and success panel)

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_field;
use crate::app::App;
use crate::state::{ContactField, Form};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const SUBMIT_BUTTON_WIDTH: u16 = 22;

/// Draw the contact form
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Name | Email
            Constraint::Length(3),             // Company
            Constraint::Min(4),                // Message
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Hint
        ])
        .margin(1)
        .split(inner);

    let name_email = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let field_areas = [name_email[0], name_email[1], chunks[1], chunks[2]];
    let active = app.form.active_field();
    for (field, field_area) in ContactField::ALL.into_iter().zip(field_areas) {
        draw_field(
            frame,
            field_area,
            field,
            app.form.get(field),
            active == field.index(),
        );
    }

    let button_area = centered(chunks[3], SUBMIT_BUTTON_WIDTH);
    render_button(
        frame,
        button_area,
        app.submit_label(),
        app.form.is_buttons_row_active(),
        app.controller.can_submit(),
    );

    if let Some(hint) = &app.hint {
        let hint = Paragraph::new(Span::styled(hint.as_str(), Style::default().fg(Color::Red)))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[4]);
    }
}

/// Draw the panel shown between a successful submission and the reset
pub fn draw_success(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4), // Message
            Constraint::Length(1), // Countdown
            Constraint::Min(0),
        ])
        .split(inner);

    let lines = vec![
        Line::from(Span::styled("✓", Style::default().fg(Color::Green))),
        Line::from(""),
        Line::from(Span::styled(
            "Message Sent Successfully",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "We'll be in touch shortly.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );

    if let Some(progress) = app.controller.reset_progress() {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(countdown_ratio(progress))
            .label("");
        frame.render_widget(gauge, centered(chunks[2], 30));
    }
}

/// Remaining share of the reset delay, eased so the bar settles smoothly
fn countdown_ratio(progress: f64) -> f64 {
    let eased = simple_easing::cubic_out(progress.clamp(0.0, 1.0) as f32);
    (1.0 - f64::from(eased)).clamp(0.0, 1.0)
}

/// Horizontally center a fixed-width strip inside `area`
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}
