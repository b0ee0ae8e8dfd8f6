//! Toast overlay for notifications

use crate::notify::{NotificationCenter, Severity, Toast};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_WIDTH: u16 = 44;

/// Stack visible toasts in the top-right corner, newest on top
pub fn render_toasts(frame: &mut Frame, center: &NotificationCenter) {
    let area = frame.area();
    let mut y = area.y + 1;

    for toast in center.visible() {
        let width = TOAST_WIDTH.min(area.width);
        // 2 for borders, 2 for padding
        let body = wrap_text(&toast.notification.body, width.saturating_sub(4) as usize);
        let height = body.len() as u16 + 3;
        if y + height > area.y + area.height {
            break;
        }

        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };
        render_toast(frame, toast_area, toast, body);
        y += height;
    }
}

fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, body: Vec<String>) {
    let color = match toast.notification.severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    };

    let mut content = vec![Line::from(vec![
        Span::styled(
            toast.notification.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", toast.issued_at.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    content.extend(body.into_iter().map(Line::from));

    // Clear the area behind the toast
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(paragraph, area);
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.len() + word.len() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("Thank you for reaching out", 12),
            vec!["Thank you", "for reaching", "out"]
        );
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_keeps_long_word() {
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }
}
