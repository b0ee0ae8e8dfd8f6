//! Field rendering utilities for forms

use crate::state::ContactField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw one contact input with its label, required marker and cursor
pub fn draw_field(frame: &mut Frame, area: Rect, field: ContactField, value: &str, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.is_multiline() {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn field_title(field: ContactField) -> String {
    if field.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_are_marked() {
        assert_eq!(field_title(ContactField::Name), " Name * ");
        assert_eq!(field_title(ContactField::Company), " Company (Optional) ");
    }
}
