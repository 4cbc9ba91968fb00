//! Terminal presentation layer.
//!
//! Screens render from the shared state and never mutate it; every user
//! intent goes back through the event loop as a session transition.

mod calculator;
mod grid;
mod quiz;
mod result;
mod selector;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::ExamApp;
use crate::exam::session::ExamStatus;

pub fn render(frame: &mut Frame, app: &ExamApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session.status {
        ExamStatus::Idle | ExamStatus::Loading => selector::render(frame, area, app),
        ExamStatus::Active => quiz::render(frame, area, app),
        ExamStatus::Finished => result::render(frame, area, app),
    }

    if app.confirm_submit {
        render_confirm(frame, area);
    }

    if app.show_calculator {
        calculator::render(frame, area, app);
    }
}

/// `hh:mm:ss` for the countdown display.
pub fn format_time(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

fn render_confirm(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 44, 5);
    frame.render_widget(Clear, popup);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Submit the whole exam?",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            "y confirm  ·  n cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(7200), "02:00:00");
        assert_eq!(format_time(3661), "01:01:01");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(0), "00:00:00");
    }
}
