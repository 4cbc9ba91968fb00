//! Exam countdown.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::app::SharedApp;

use super::session::ExamStatus;

/// Handle to the one-second countdown task.
///
/// The task applies [`ExamSession::tick`](super::session::ExamSession::tick)
/// while the exam is active and exits the moment the status is anything
/// else, including the finish it causes itself when the clock reaches zero.
/// Owners call [`stop`](Self::stop) whenever the exam leaves the active
/// state by another path, so no orphaned tick can fire against a later
/// session.
pub struct CountdownTimer {
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    /// Spawn the countdown against the shared app state.
    pub fn spawn(app: SharedApp) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the countdown starts
            // one full second later.
            interval.tick().await;

            loop {
                interval.tick().await;

                let mut app = app.lock().await;
                if app.session.status != ExamStatus::Active {
                    break;
                }

                app.session.tick();

                if app.session.status != ExamStatus::Active {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Cancel the countdown task.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;
    use crate::app::{ExamApp, SharedApp};
    use crate::exam::session::EXAM_DURATION_SECS;

    fn active_app() -> SharedApp {
        let mut app = ExamApp::new();
        app.session.status = ExamStatus::Active;
        Arc::new(Mutex::new(app))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let app = active_app();
        let timer = CountdownTimer::spawn(app.clone());

        time::sleep(Duration::from_millis(3500)).await;

        assert_eq!(
            app.lock().await.session.time_remaining,
            EXAM_DURATION_SECS - 3
        );
        timer.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_halts_once_status_leaves_active() {
        let app = active_app();
        let _timer = CountdownTimer::spawn(app.clone());

        time::sleep(Duration::from_millis(1500)).await;
        app.lock().await.session.finish();
        let frozen = app.lock().await.session.time_remaining;

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(app.lock().await.session.time_remaining, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_exam_when_clock_runs_out() {
        let app = active_app();
        app.lock().await.session.time_remaining = 2;
        let _timer = CountdownTimer::spawn(app.clone());

        time::sleep(Duration::from_millis(2500)).await;

        let app = app.lock().await;
        assert_eq!(app.session.status, ExamStatus::Finished);
        assert_eq!(app.session.time_remaining, 0);
    }
}
