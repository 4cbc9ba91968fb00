//! Exam screen: subject tabs, countdown, question panel, navigation grid.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::app::ExamApp;
use crate::models::subject;

use super::{format_time, grid};

/// Countdown turns red below this many seconds.
const LOW_TIME_SECS: u64 = 5 * 60;

pub fn render(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // tabs + clock
        Constraint::Min(10),   // body
        Constraint::Length(2), // controls
    ])
    .split(area);

    render_header(frame, chunks[0], app);

    let body = Layout::horizontal([Constraint::Min(40), Constraint::Length(26)]).split(chunks[1]);
    render_question_panel(frame, body[0], app);
    grid::render(frame, body[1], &app.session);

    render_controls(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let parts = Layout::horizontal([Constraint::Min(20), Constraint::Length(10)]).split(area);

    let session = &app.session;
    let mut spans = vec![Span::raw(" ")];
    for (i, id) in session.selected_subjects.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        }

        let style = if *id == session.current_subject {
            Style::default().fg(Color::Green).bold()
        } else if session.subject_loaded(id) {
            Style::default().fg(Color::White)
        } else {
            // First batch still on its way.
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(subject::display_name(id), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), parts[0]);

    let clock_color = if session.time_remaining < LOW_TIME_SECS {
        Color::Red
    } else {
        Color::Cyan
    };
    let clock = Paragraph::new(format_time(session.time_remaining))
        .alignment(Alignment::Right)
        .style(Style::default().fg(clock_color).bold());
    frame.render_widget(clock, parts[1]);
}

fn render_question_panel(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let session = &app.session;

    if session.current_questions().is_empty() {
        let name = subject::display_name(&session.current_subject);
        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Loading {} questions...", name),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(
                "You can answer other subjects while this loads.".fg(Color::DarkGray),
            ),
        ];

        let widget = Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(widget, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // progress
        Constraint::Length(6), // question text
        Constraint::Min(6),    // options
        Constraint::Length(6), // feedback
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], app);
    render_options(frame, chunks[2], app);
    render_feedback(frame, chunks[3], app);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let session = &app.session;
    let text = format!(
        "{} — Question {} of {}",
        subject::display_name(&session.current_subject),
        session.current_index + 1,
        session.current_questions().len()
    );

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let Some(question) = app.session.current_question() else {
        return;
    };

    let mut lines = vec![Line::from(question.question.as_str())];
    if !question.image.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[diagram: {}]", question.image),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let session = &app.session;
    let Some(question) = session.current_question() else {
        return;
    };

    let selected = session.answer_at(&session.current_subject, session.current_index);
    let submitted = session.is_submitted(&session.current_subject, session.current_index);

    let lines: Vec<Line> = question
        .option
        .lettered()
        .into_iter()
        .map(|(letter, text)| {
            let letter_str = letter.to_string();
            let is_selected = selected.is_some_and(|s| s.eq_ignore_ascii_case(&letter_str));
            let is_correct = question.is_correct(&letter_str);

            let (marker, style) = if submitted {
                if is_correct {
                    ("+", Style::default().fg(Color::Green).bold())
                } else if is_selected {
                    ("x", Style::default().fg(Color::Red))
                } else {
                    (" ", Style::default().fg(Color::DarkGray))
                }
            } else if is_selected {
                (">", Style::default().fg(Color::Yellow).bold())
            } else {
                (" ", Style::default().fg(Color::White))
            };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(format!("({}) ", letter), style),
                Span::styled(text.to_string(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let session = &app.session;
    if !session.is_submitted(&session.current_subject, session.current_index) {
        return;
    }
    let Some(question) = session.current_question() else {
        return;
    };

    let selected = session
        .answer_at(&session.current_subject, session.current_index)
        .unwrap_or("");
    let correct = question.is_correct(selected);

    let (verdict, color) = if correct {
        ("Correct!", Color::Green)
    } else {
        ("Incorrect", Color::Red)
    };

    let mut lines = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(Span::styled(
            format!("The correct answer is {}.", question.answer.to_uppercase()),
            Style::default().fg(Color::White),
        )),
    ];
    if !question.solution.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Explanation: {}", question.solution),
            Style::default().fg(Color::Gray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "1-4 select  ·  Enter submit/next  ·  arrows move  ·  Tab subject  ·  c calculator  ·  s submit exam  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
