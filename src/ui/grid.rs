//! Question navigation grid for the active subject.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::exam::session::ExamSession;

const COLUMNS: usize = 5;

pub fn render(frame: &mut Frame, area: Rect, session: &ExamSession) {
    let total = session.current_questions().len();
    let subject_id = &session.current_subject;

    let mut lines = Vec::new();
    let mut row = Vec::new();

    for index in 0..total {
        let style = if index == session.current_index {
            Style::default().fg(Color::White).bg(Color::Blue).bold()
        } else if session.is_submitted(subject_id, index) {
            Style::default().fg(Color::Green)
        } else if session.has_answer(subject_id, index) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        row.push(Span::styled(format!("{:>3} ", index + 1), style));
        if row.len() == COLUMNS {
            lines.push(Line::from(std::mem::take(&mut row)));
        }
    }
    if !row.is_empty() {
        lines.push(Line::from(row));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "loading...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Navigator ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}
