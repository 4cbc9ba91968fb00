//! Subject selection screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::ExamApp;
use crate::exam::session::ExamStatus;
use crate::models::{AVAILABLE_SUBJECTS, MANDATORY_SUBJECT, SUBJECTS_PER_EXAM};

pub fn render(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // title
        Constraint::Min(19),   // catalog
        Constraint::Length(1), // status / error
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_subjects(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "JAMB CBT PRACTICE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Select your four subjects to begin the examination".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_subjects(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let selector = &app.selector;

    let lines: Vec<Line> = AVAILABLE_SUBJECTS
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let is_cursor = i == selector.cursor;
            let is_chosen = selector.is_chosen(subject.id);

            let prefix = if is_cursor { "> " } else { "  " };
            let marker = if is_chosen { "[x]" } else { "[ ]" };

            let style = if is_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else if is_chosen {
                Style::default().fg(Color::Green)
            } else if selector.is_complete() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(format!("{} ", marker), style),
                Span::styled(format!("{:<24}", subject.name), style),
                Span::styled(
                    format!("{:>3} questions", subject.question_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ];

            if subject.id == MANDATORY_SUBJECT {
                spans.push(Span::styled(
                    "  REQUIRED",
                    Style::default().fg(Color::Green).bold(),
                ));
            }

            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Subjects ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let line = if app.session.status == ExamStatus::Loading {
        Line::from(Span::styled(
            "Fetching your questions...",
            Style::default().fg(Color::Yellow).bold(),
        ))
    } else if let Some(error) = &app.session.load_error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).bold(),
        ))
    } else {
        let chosen = app.selector.chosen.len();
        let color = if app.selector.is_complete() {
            Color::Green
        } else {
            Color::Yellow
        };
        Line::from(Span::styled(
            format!("{}/{} selected", chosen, SUBJECTS_PER_EXAM),
            Style::default().fg(color),
        ))
    };

    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k move  ·  Space toggle  ·  Enter start  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
