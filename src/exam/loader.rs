//! Fast-start loading orchestration.
//!
//! An exam begins on a small mandatory-subject batch so the candidate is
//! never blocked on a slow network; the rest of every subject streams in
//! behind the running exam. Only the fast-start fetch can fail the start.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app::{ExamApp, SharedApp};
use crate::bank::QuestionBank;
use crate::models::{subject, MANDATORY_SUBJECT};

use super::session::ExamStatus;
use super::timer::CountdownTimer;

/// Questions fetched up front so the exam can begin immediately.
pub const FAST_START_COUNT: usize = 5;

/// Start an exam over the chosen subjects.
///
/// Fetches the mandatory subject's fast-start batch, activates the session
/// and starts the countdown, then spawns the background fills: the
/// mandatory remainder in one task, the other subjects strictly one at a
/// time in another. Background failures leave subjects under-populated but
/// never end the exam.
pub async fn start_exam(app: SharedApp, bank: Arc<QuestionBank>, subjects: Vec<String>) {
    {
        let mut app = app.lock().await;
        // Check-and-transition under one lock so a second start racing this
        // one bails out instead of adopting the Loading state it set.
        if app.session.status != ExamStatus::Idle {
            return;
        }
        app.session.start_loading(subjects.clone());
        if app.session.status != ExamStatus::Loading {
            return;
        }
    }

    let Some(english) = subject::find(MANDATORY_SUBJECT) else {
        app.lock()
            .await
            .session
            .fail_start("English Language is missing from the subject catalog.");
        return;
    };

    // The client swallows per-item failures, so a dead network shows up
    // here as an empty batch.
    let first_batch = bank.fetch_batch(MANDATORY_SUBJECT, FAST_START_COUNT).await;
    if first_batch.is_empty() {
        warn!("fast-start batch for {} came back empty", MANDATORY_SUBJECT);
        app.lock()
            .await
            .session
            .fail_start("Could not load questions. Check your connection and try again.");
        return;
    }

    let attempt = {
        let shared = app.clone();
        let mut app = app.lock().await;
        app.session.activate(first_batch);
        if app.session.status != ExamStatus::Active {
            return;
        }
        app.timer = Some(CountdownTimer::spawn(shared));
        app.session.id
    };

    info!(
        subject = MANDATORY_SUBJECT,
        count = FAST_START_COUNT,
        "exam activated on fast-start batch"
    );

    // The mandatory remainder races the other subjects' loop (and the
    // candidate).
    tokio::spawn(fill_subject(
        app.clone(),
        bank.clone(),
        attempt,
        MANDATORY_SUBJECT.to_string(),
        english.question_count.saturating_sub(FAST_START_COUNT),
    ));

    let others: Vec<String> = subjects
        .into_iter()
        .filter(|s| s != MANDATORY_SUBJECT)
        .collect();
    tokio::spawn(load_other_subjects(app, bank, attempt, others));
}

/// Load the non-mandatory subjects one after another: fast-start batch,
/// state init, then the remainder, fully settled before the next subject.
async fn load_other_subjects(
    app: SharedApp,
    bank: Arc<QuestionBank>,
    attempt: Uuid,
    subjects: Vec<String>,
) {
    for subject_id in subjects {
        let Some(descriptor) = subject::find(&subject_id) else {
            warn!(subject = %subject_id, "subject missing from the catalog, skipped");
            continue;
        };

        let first_batch = bank.fetch_batch(&subject_id, FAST_START_COUNT).await;

        {
            let mut app = app.lock().await;
            if stale(&app, attempt) {
                return;
            }
            if first_batch.is_empty() {
                warn!(subject = %subject_id, "first batch came back empty");
            }
            app.session.init_subject(&subject_id, first_batch);
        }

        fill_subject(
            app.clone(),
            bank.clone(),
            attempt,
            subject_id,
            descriptor.question_count.saturating_sub(FAST_START_COUNT),
        )
        .await;
    }
}

/// Fetch `count` more questions for a subject and merge them in, unless
/// the attempt has ended or been replaced in the meantime.
async fn fill_subject(
    app: SharedApp,
    bank: Arc<QuestionBank>,
    attempt: Uuid,
    subject_id: String,
    count: usize,
) {
    if count == 0 {
        return;
    }

    let remainder = bank
        .fetch_batch_with_progress(&subject_id, count, |n| {
            debug!(subject = %subject_id, fetched = n, "background chunk settled");
        })
        .await;

    if remainder.is_empty() {
        warn!(subject = %subject_id, "background load delivered nothing, continuing with a partial set");
        return;
    }

    let mut app = app.lock().await;
    if stale(&app, attempt) {
        debug!(subject = %subject_id, "dropping straggler batch for a stale attempt");
        return;
    }
    app.session.merge_questions(&subject_id, remainder);
}

fn stale(app: &ExamApp, attempt: Uuid) -> bool {
    app.session.id != attempt || app.session.status == ExamStatus::Finished
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;

    use super::*;

    fn shared_app() -> SharedApp {
        Arc::new(Mutex::new(ExamApp::new()))
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_subject_selection() {
        let app = shared_app();
        let bank = Arc::new(QuestionBank::new());

        // Three subjects; nothing is fetched and the session stays idle.
        let subjects = vec!["english".into(), "mathematics".into(), "physics".into()];
        start_exam(app.clone(), bank, subjects).await;

        let app = app.lock().await;
        assert_eq!(app.session.status, ExamStatus::Idle);
        assert!(app.timer.is_none());
    }

    #[tokio::test]
    async fn test_start_ignored_while_an_attempt_is_running() {
        let app = shared_app();
        let bank = Arc::new(QuestionBank::new());
        app.lock().await.session.status = ExamStatus::Active;

        let subjects = ["english", "mathematics", "physics", "chemistry"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        start_exam(app.clone(), bank, subjects).await;

        let app = app.lock().await;
        assert_eq!(app.session.status, ExamStatus::Active);
        assert!(app.timer.is_none());
    }

    #[tokio::test]
    async fn test_stale_guard_drops_replaced_and_finished_attempts() {
        let app = shared_app();
        let attempt = app.lock().await.session.id;

        assert!(!stale(&*app.lock().await, attempt));
        assert!(stale(&*app.lock().await, Uuid::new_v4()));

        app.lock().await.session.status = ExamStatus::Finished;
        assert!(stale(&*app.lock().await, attempt));
    }
}
