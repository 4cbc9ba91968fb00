//! Calculator popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::ExamApp;

pub fn render(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let popup = super::centered(area, 40, 7);
    frame.render_widget(Clear, popup);

    let input = if app.calculator.input.is_empty() {
        "0"
    } else {
        app.calculator.input.as_str()
    };
    let result = app.calculator.result.as_deref().unwrap_or("");

    let result_color = if result == "Error" {
        Color::Red
    } else {
        Color::Green
    };

    let content = vec![
        Line::from(Span::styled(
            input,
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            result,
            Style::default().fg(result_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter =  ·  Del clear  ·  Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Right).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Calculator ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, popup);
}
