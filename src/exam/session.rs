//! Exam session state.
//!
//! This module is the single source of truth for one exam attempt. Every
//! mutation is a transition method guarded by the lifecycle status; a call
//! that is not valid in the current status is ignored. Callers serialize
//! all transitions through one shared handle, so each transition always
//! observes the latest snapshot before it mutates.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::{Question, MANDATORY_SUBJECT, SUBJECTS_PER_EXAM};

/// Full exam duration in seconds (2 hours).
pub const EXAM_DURATION_SECS: u64 = 2 * 60 * 60;

/// Lifecycle of an exam attempt. Strictly forward; nothing leaves
/// `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamStatus {
    /// Picking subjects, nothing fetched yet.
    Idle,
    /// The mandatory subject's fast-start batch is on its way.
    Loading,
    /// The candidate is answering; the countdown is running.
    Active,
    /// Time expired or the candidate submitted the whole exam.
    Finished,
}

/// One exam attempt.
///
/// A fresh instance is created for every attempt; restarting never reuses
/// an old session, so background work spawned against a discarded attempt
/// can recognize itself as stale via `id`.
pub struct ExamSession {
    pub status: ExamStatus,
    /// Ordered, exactly four once loading starts, `english` always present.
    pub selected_subjects: Vec<String>,
    /// Questions fetched so far, per subject. Append-only, unique by id.
    pub questions: HashMap<String, Vec<Question>>,
    /// Selected option letter per question index, per subject.
    pub answers: HashMap<String, HashMap<usize, String>>,
    /// Indices the candidate has locked in, per subject.
    pub submitted: HashMap<String, HashSet<usize>>,
    pub current_subject: String,
    pub current_index: usize,
    /// Seconds left on the countdown.
    pub time_remaining: u64,
    /// Attempt identity; background merges against another id are stale.
    pub id: Uuid,
    /// User-visible message when the start sequence failed.
    pub load_error: Option<String>,
}

impl ExamSession {
    pub fn new() -> Self {
        Self {
            status: ExamStatus::Idle,
            selected_subjects: Vec::new(),
            questions: HashMap::new(),
            answers: HashMap::new(),
            submitted: HashMap::new(),
            current_subject: String::new(),
            current_index: 0,
            time_remaining: EXAM_DURATION_SECS,
            id: Uuid::new_v4(),
            load_error: None,
        }
    }

    // ---- lifecycle transitions ----

    /// Record the chosen subjects and enter `Loading`. Only valid from
    /// `Idle` with exactly four subjects including the mandatory one.
    pub fn start_loading(&mut self, subjects: Vec<String>) {
        if self.status != ExamStatus::Idle {
            return;
        }
        if subjects.len() != SUBJECTS_PER_EXAM
            || !subjects.iter().any(|s| s == MANDATORY_SUBJECT)
        {
            return;
        }

        self.status = ExamStatus::Loading;
        self.selected_subjects = subjects;
        self.load_error = None;
    }

    /// Abort a failed start: back to `Idle` with a user-visible message.
    pub fn fail_start(&mut self, message: impl Into<String>) {
        if self.status != ExamStatus::Loading {
            return;
        }

        self.status = ExamStatus::Idle;
        self.selected_subjects.clear();
        self.load_error = Some(message.into());
    }

    /// Seed the mandatory subject and make the exam interactive. Only valid
    /// from `Loading`; resets the cursor and the full countdown.
    pub fn activate(&mut self, english_questions: Vec<Question>) {
        if self.status != ExamStatus::Loading {
            return;
        }

        self.status = ExamStatus::Active;
        self.questions
            .insert(MANDATORY_SUBJECT.to_string(), english_questions);
        self.answers
            .insert(MANDATORY_SUBJECT.to_string(), HashMap::new());
        self.submitted
            .insert(MANDATORY_SUBJECT.to_string(), HashSet::new());
        self.current_subject = MANDATORY_SUBJECT.to_string();
        self.current_index = 0;
        self.time_remaining = EXAM_DURATION_SECS;
    }

    /// Append questions whose ids are not already present for the subject.
    /// Valid in any non-`Finished` status.
    pub fn merge_questions(&mut self, subject_id: &str, new_questions: Vec<Question>) {
        if self.status == ExamStatus::Finished {
            return;
        }

        let list = self.questions.entry(subject_id.to_string()).or_default();
        let mut seen: HashSet<u64> = list.iter().map(|q| q.id).collect();

        for question in new_questions {
            if seen.insert(question.id) {
                list.push(question);
            }
        }
    }

    /// Install a background subject's first batch and empty answer state.
    pub fn init_subject(&mut self, subject_id: &str, first_batch: Vec<Question>) {
        if self.status != ExamStatus::Active {
            return;
        }

        self.questions.insert(subject_id.to_string(), first_batch);
        self.answers.entry(subject_id.to_string()).or_default();
        self.submitted.entry(subject_id.to_string()).or_default();
    }

    // ---- candidate transitions ----

    /// Select an option letter for the current question. Overwrites any
    /// earlier selection; ignored once the question is submitted.
    pub fn select_answer(&mut self, option: &str) {
        if self.status != ExamStatus::Active {
            return;
        }
        if self.is_submitted(&self.current_subject, self.current_index) {
            return;
        }

        self.answers
            .entry(self.current_subject.clone())
            .or_default()
            .insert(self.current_index, option.to_string());
    }

    /// Submit-then-move: a pending unsubmitted answer is locked in and the
    /// cursor stays put; otherwise the cursor moves one question forward,
    /// clamped to the last loaded question.
    pub fn advance(&mut self) {
        if self.status != ExamStatus::Active {
            return;
        }

        let len = self.current_questions().len();
        if len == 0 {
            return;
        }

        let subject = self.current_subject.clone();
        let index = self.current_index;

        if self.has_answer(&subject, index) && !self.is_submitted(&subject, index) {
            self.submitted.entry(subject).or_default().insert(index);
            return;
        }

        self.current_index = (index + 1).min(len - 1);
    }

    /// Jump the cursor to `index`. The caller clamps to the loaded range.
    pub fn navigate(&mut self, index: usize) {
        if self.status != ExamStatus::Active {
            return;
        }

        self.current_index = index;
    }

    /// Switch the active subject and reset the cursor to its first
    /// question. The subject must be one of the selected four.
    pub fn change_subject(&mut self, subject_id: &str) {
        if self.status != ExamStatus::Active {
            return;
        }
        if !self.selected_subjects.iter().any(|s| s == subject_id) {
            return;
        }

        self.current_subject = subject_id.to_string();
        self.current_index = 0;
    }

    /// End the exam.
    pub fn finish(&mut self) {
        if self.status == ExamStatus::Active {
            self.status = ExamStatus::Finished;
        }
    }

    /// One countdown second. Reaching zero finishes the exam in the same
    /// transition and pins the clock at zero.
    pub fn tick(&mut self) {
        if self.status != ExamStatus::Active {
            return;
        }

        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.status = ExamStatus::Finished;
        } else {
            self.time_remaining -= 1;
        }
    }

    // ---- reads ----

    /// Questions loaded so far for the current subject.
    pub fn current_questions(&self) -> &[Question] {
        self.questions
            .get(&self.current_subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_questions().get(self.current_index)
    }

    /// The selected option letter at an index, if any.
    pub fn answer_at(&self, subject_id: &str, index: usize) -> Option<&str> {
        self.answers
            .get(subject_id)
            .and_then(|m| m.get(&index))
            .map(String::as_str)
    }

    pub fn has_answer(&self, subject_id: &str, index: usize) -> bool {
        self.answer_at(subject_id, index).is_some()
    }

    pub fn is_submitted(&self, subject_id: &str, index: usize) -> bool {
        self.submitted
            .get(subject_id)
            .is_some_and(|s| s.contains(&index))
    }

    /// Whether a subject has received its first batch yet.
    pub fn subject_loaded(&self, subject_id: &str) -> bool {
        self.questions.contains_key(subject_id)
    }
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new()
    }
}
