//! End-of-exam scoring.

use super::session::ExamSession;

/// Result line for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectScore {
    pub subject_id: String,
    pub correct: usize,
    /// Questions actually delivered for the subject, not the catalog
    /// target. An exam that ends mid-load is scored on what arrived.
    pub total: usize,
}

impl SubjectScore {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

/// Scores for a whole attempt, in subject selection order.
#[derive(Debug, Clone, Default)]
pub struct ScoreReport {
    pub subjects: Vec<SubjectScore>,
}

impl ScoreReport {
    pub fn total_correct(&self) -> usize {
        self.subjects.iter().map(|s| s.correct).sum()
    }

    pub fn total_questions(&self) -> usize {
        self.subjects.iter().map(|s| s.total).sum()
    }

    /// Aggregate percentage; 0 when nothing was delivered at all.
    pub fn percentage(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            0.0
        } else {
            self.total_correct() as f64 / total as f64 * 100.0
        }
    }
}

/// Score an attempt. A question counts as correct when an answer was
/// recorded at its index and the letter matches the canonical answer,
/// case-insensitively. Submission state is irrelevant: a selected but
/// never-locked answer still counts at expiry.
pub fn score(session: &ExamSession) -> ScoreReport {
    let subjects = session
        .selected_subjects
        .iter()
        .map(|subject_id| {
            let questions = session
                .questions
                .get(subject_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let correct = questions
                .iter()
                .enumerate()
                .filter(|(index, question)| {
                    session
                        .answer_at(subject_id, *index)
                        .is_some_and(|selected| question.is_correct(selected))
                })
                .count();

            SubjectScore {
                subject_id: subject_id.clone(),
                correct,
                total: questions.len(),
            }
        })
        .collect();

    ScoreReport { subjects }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::session::ExamSession;
    use crate::models::{Options, Question};

    fn question(id: u64, answer: &str) -> Question {
        Question {
            id,
            question: format!("question {}", id),
            option: Options::default(),
            answer: answer.to_string(),
            image: String::new(),
            solution: String::new(),
            section: String::new(),
            examtype: String::new(),
            examyear: String::new(),
        }
    }

    fn session_with_english(questions: Vec<Question>) -> ExamSession {
        let mut session = ExamSession::new();
        session.start_loading(
            ["english", "mathematics", "physics", "chemistry"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        session.activate(questions);
        session
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        let mut session = session_with_english(vec![question(1, "b")]);
        session.select_answer("B");
        session.advance();
        session.finish();

        let report = score(&session);
        assert_eq!(report.subjects[0].correct, 1);
    }

    #[test]
    fn test_score_counts_unsubmitted_answers() {
        // Selected-but-never-locked answers count at exam end. This is the
        // shipped behavior; keep it unless product says otherwise.
        let mut session = session_with_english(vec![question(1, "a"), question(2, "c")]);
        session.select_answer("a");
        session.navigate(1);
        session.select_answer("c");
        session.finish();

        let report = score(&session);
        assert!(session.submitted["english"].is_empty());
        assert_eq!(report.subjects[0].correct, 2);
    }

    #[test]
    fn test_totals_use_loaded_counts_not_targets() {
        let mut session = session_with_english(vec![
            question(1, "a"),
            question(2, "b"),
            question(3, "c"),
        ]);
        session.select_answer("a");
        session.finish();

        let report = score(&session);
        let english = &report.subjects[0];
        assert_eq!(english.total, 3);
        assert_eq!(english.correct, 1);

        // Subjects whose background load never landed score 0/0.
        let math = &report.subjects[1];
        assert_eq!((math.correct, math.total), (0, 0));
    }

    #[test]
    fn test_empty_exam_reports_zero_percent() {
        let session = ExamSession::new();
        let report = score(&session);

        assert_eq!(report.total_questions(), 0);
        assert_eq!(report.percentage(), 0.0);
        assert!(report.percentage().is_finite());
    }

    #[test]
    fn test_wrong_and_missing_answers_do_not_count() {
        let mut session = session_with_english(vec![question(1, "a"), question(2, "b")]);
        session.select_answer("d");
        session.finish();

        let report = score(&session);
        assert_eq!(report.subjects[0].correct, 0);
        assert_eq!(report.subjects[0].total, 2);
        assert_eq!(report.percentage(), 0.0);
    }
}
