//! Result screen shown once the exam is finished.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::ExamApp;
use crate::exam::score::{self, ScoreReport};
use crate::models::subject;

const BAR_WIDTH: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &ExamApp) {
    let report = score::score(&app.session);

    let chunks = Layout::vertical([
        Constraint::Length(6), // summary
        Constraint::Min(8),    // per-subject breakdown
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_summary(frame, chunks[0], &report);
    render_breakdown(frame, chunks[1], &report);
    render_controls(frame, chunks[2]);
}

fn render_summary(frame: &mut Frame, area: Rect, report: &ScoreReport) {
    let percentage = report.percentage();

    let grade_color = match percentage as u32 {
        70..=100 => Color::Green,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "EXAMINATION COMPLETED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)",
                report.total_correct(),
                report.total_questions(),
                percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, report: &ScoreReport) {
    let lines: Vec<Line> = report
        .subjects
        .iter()
        .map(|subject_score| {
            let name = subject::display_name(&subject_score.subject_id);
            let percentage = subject_score.percentage();

            Line::from(vec![
                Span::styled(format!("{:<24}", name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:>3} / {:<3} ", subject_score.correct, subject_score.total),
                    Style::default().fg(Color::White).bold(),
                ),
                Span::styled(bar(percentage), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" {:.0}%", percentage),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Breakdown ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r take another test  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_is_fixed_width() {
        assert_eq!(bar(0.0), "··········");
        assert_eq!(bar(100.0), "##########");
        assert_eq!(bar(50.0).chars().count(), BAR_WIDTH);
    }
}
