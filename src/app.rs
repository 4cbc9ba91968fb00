//! Shared application state and the terminal event loop.
//!
//! Everything mutable lives in one [`ExamApp`] behind an async mutex. The
//! event loop, the countdown task and the background loaders each lock it,
//! apply a transition against the latest snapshot, and release. That one
//! channel is what keeps background merges and candidate edits from
//! clobbering each other.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::Mutex;

use crate::bank::QuestionBank;
use crate::calc;
use crate::exam::loader;
use crate::exam::session::{ExamSession, ExamStatus};
use crate::exam::timer::CountdownTimer;
use crate::models::{AVAILABLE_SUBJECTS, MANDATORY_SUBJECT, SUBJECTS_PER_EXAM};
use crate::terminal;
use crate::ui;

/// Shared app state, locked by the event loop and every background task.
pub type SharedApp = Arc<Mutex<ExamApp>>;

/// Subject-picker state for the selection screen.
pub struct SelectorState {
    /// Highlighted row in the catalog list.
    pub cursor: usize,
    /// Chosen subject ids in selection order; english is fixed first.
    pub chosen: Vec<String>,
}

impl SelectorState {
    fn new() -> Self {
        Self {
            cursor: 0,
            chosen: vec![MANDATORY_SUBJECT.to_string()],
        }
    }

    pub fn is_chosen(&self, id: &str) -> bool {
        self.chosen.iter().any(|s| s == id)
    }

    pub fn is_complete(&self) -> bool {
        self.chosen.len() == SUBJECTS_PER_EXAM
    }

    /// Toggle a subject in or out. English cannot be removed and nothing
    /// can be added past the limit of four.
    fn toggle(&mut self, id: &str) {
        if id == MANDATORY_SUBJECT {
            return;
        }

        if let Some(pos) = self.chosen.iter().position(|s| s == id) {
            self.chosen.remove(pos);
        } else if self.chosen.len() < SUBJECTS_PER_EXAM {
            self.chosen.push(id.to_string());
        }
    }

    fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(AVAILABLE_SUBJECTS.len() - 1);
    }
}

/// On-screen calculator state. The expression is typed as one line and
/// evaluated on demand; anything the evaluator rejects displays `Error`.
pub struct CalculatorState {
    pub input: String,
    pub result: Option<String>,
}

impl CalculatorState {
    fn new() -> Self {
        Self {
            input: String::new(),
            result: None,
        }
    }

    fn push(&mut self, c: char) {
        self.input.push(c);
        self.result = None;
    }

    fn backspace(&mut self) {
        self.input.pop();
        self.result = None;
    }

    fn clear(&mut self) {
        self.input.clear();
        self.result = None;
    }

    fn evaluate(&mut self) {
        if self.input.is_empty() {
            return;
        }

        self.result = Some(match calc::evaluate(&self.input) {
            Ok(value) => value.to_string(),
            Err(_) => "Error".to_string(),
        });
    }
}

/// Everything the event loop and the background tasks share.
pub struct ExamApp {
    pub session: ExamSession,
    pub selector: SelectorState,
    pub calculator: CalculatorState,
    pub show_calculator: bool,
    /// Submit-whole-exam confirmation dialog is open.
    pub confirm_submit: bool,
    pub timer: Option<CountdownTimer>,
    pub should_quit: bool,
}

impl ExamApp {
    pub fn new() -> Self {
        Self {
            session: ExamSession::new(),
            selector: SelectorState::new(),
            calculator: CalculatorState::new(),
            show_calculator: false,
            confirm_submit: false,
            timer: None,
            should_quit: false,
        }
    }

    /// Discard the attempt and return to subject selection with a brand
    /// new session. Stragglers from the old attempt no longer match its id
    /// and are dropped on arrival.
    fn restart(&mut self) {
        self.stop_timer();
        self.session = ExamSession::new();
        self.selector = SelectorState::new();
        self.calculator = CalculatorState::new();
        self.show_calculator = false;
        self.confirm_submit = false;
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

impl Default for ExamApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the exam client until the candidate quits.
pub async fn run() -> io::Result<()> {
    let app: SharedApp = Arc::new(Mutex::new(ExamApp::new()));
    let bank = Arc::new(QuestionBank::new());
    run_tui(app, bank).await
}

async fn run_tui(app: SharedApp, bank: Arc<QuestionBank>) -> io::Result<()> {
    let mut terminal = terminal::init()?;

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
        }

        {
            let app = app.lock().await;
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // Poll with a timeout so countdown ticks and background merges
        // repaint without a keypress.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(&app, &bank, key.code).await {
                    break;
                }
            }
        }
    }

    app.lock().await.stop_timer();
    terminal::restore()?;
    Ok(())
}

/// Returns true when the app should exit.
async fn handle_input(app: &SharedApp, bank: &Arc<QuestionBank>, key: KeyCode) -> bool {
    let mut guard = app.lock().await;

    if guard.show_calculator {
        handle_calculator_input(&mut guard, key);
        return false;
    }

    if guard.confirm_submit {
        handle_confirm_input(&mut guard, key);
        return false;
    }

    match guard.session.status {
        ExamStatus::Idle => handle_selector_input(&mut guard, app, bank, key),
        ExamStatus::Loading => false,
        ExamStatus::Active => handle_exam_input(&mut guard, key),
        ExamStatus::Finished => handle_result_input(&mut guard, key),
    }
}

fn handle_selector_input(
    app: &mut ExamApp,
    shared: &SharedApp,
    bank: &Arc<QuestionBank>,
    key: KeyCode,
) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.selector.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.selector.cursor_down(),
        KeyCode::Char(' ') => {
            let id = AVAILABLE_SUBJECTS[app.selector.cursor].id;
            app.selector.toggle(id);
        }
        KeyCode::Enter => {
            if app.selector.is_complete() {
                let chosen = app.selector.chosen.clone();
                tokio::spawn(loader::start_exam(
                    Arc::clone(shared),
                    Arc::clone(bank),
                    chosen,
                ));
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }

    false
}

fn handle_exam_input(app: &mut ExamApp, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c @ '1'..='4') => {
            let letter = (b'a' + (c as u8 - b'1')) as char;
            app.session.select_answer(&letter.to_string());
        }
        KeyCode::Enter | KeyCode::Right => app.session.advance(),
        KeyCode::Left => {
            let index = app.session.current_index.saturating_sub(1);
            app.session.navigate(index);
        }
        KeyCode::Home => app.session.navigate(0),
        KeyCode::End => {
            let len = app.session.current_questions().len();
            if len > 0 {
                app.session.navigate(len - 1);
            }
        }
        KeyCode::Tab => change_subject_relative(app, 1),
        KeyCode::BackTab => change_subject_relative(app, -1),
        KeyCode::Char('c') | KeyCode::Char('C') => app.show_calculator = true,
        KeyCode::Char('s') | KeyCode::Char('S') => app.confirm_submit = true,
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }

    false
}

fn handle_result_input(app: &mut ExamApp, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }

    false
}

fn handle_confirm_input(app: &mut ExamApp, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_submit = false;
            app.session.finish();
            app.stop_timer();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_submit = false,
        _ => {}
    }
}

fn handle_calculator_input(app: &mut ExamApp, key: KeyCode) {
    match key {
        KeyCode::Esc => app.show_calculator = false,
        KeyCode::Enter | KeyCode::Char('=') => app.calculator.evaluate(),
        KeyCode::Backspace => app.calculator.backspace(),
        KeyCode::Delete => app.calculator.clear(),
        KeyCode::Char(c) if matches!(c, '0'..='9' | '.' | '+' | '-' | '*' | '/') => {
            app.calculator.push(c)
        }
        _ => {}
    }
}

/// Step through the selected subjects in order, wrapping at the ends.
fn change_subject_relative(app: &mut ExamApp, step: isize) {
    let subjects = &app.session.selected_subjects;
    if subjects.is_empty() {
        return;
    }

    let len = subjects.len() as isize;
    let current = subjects
        .iter()
        .position(|s| *s == app.session.current_subject)
        .unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(len) as usize;

    let id = subjects[next].clone();
    app.session.change_subject(&id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_keeps_english_and_caps_at_four() {
        let mut selector = SelectorState::new();
        assert!(selector.is_chosen("english"));

        selector.toggle("english");
        assert!(selector.is_chosen("english"));

        selector.toggle("mathematics");
        selector.toggle("physics");
        selector.toggle("chemistry");
        assert!(selector.is_complete());

        selector.toggle("biology");
        assert!(!selector.is_chosen("biology"));

        selector.toggle("physics");
        assert!(!selector.is_chosen("physics"));
        assert!(!selector.is_complete());
    }

    #[test]
    fn test_calculator_state_evaluates_and_clears() {
        let mut calculator = CalculatorState::new();
        for c in "2+3*4".chars() {
            calculator.push(c);
        }

        calculator.evaluate();
        assert_eq!(calculator.result.as_deref(), Some("14"));

        calculator.push('1');
        assert!(calculator.result.is_none());

        calculator.clear();
        calculator.evaluate();
        assert!(calculator.result.is_none());
    }

    #[test]
    fn test_calculator_reports_errors_as_error() {
        let mut calculator = CalculatorState::new();
        for c in "5/0".chars() {
            calculator.push(c);
        }

        calculator.evaluate();
        assert_eq!(calculator.result.as_deref(), Some("Error"));
    }

    #[test]
    fn test_subject_cycling_wraps() {
        let mut app = ExamApp::new();
        app.session.start_loading(
            ["english", "mathematics", "physics", "chemistry"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        app.session.activate(Vec::new());

        change_subject_relative(&mut app, -1);
        assert_eq!(app.session.current_subject, "chemistry");

        change_subject_relative(&mut app, 1);
        assert_eq!(app.session.current_subject, "english");
    }
}
