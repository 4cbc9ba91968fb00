//! # jamb-cbt
//!
//! A terminal practice client for the JAMB CBT examination.
//!
//! The candidate picks four subjects (English Language is compulsory), the
//! exam starts on a small fast-start batch fetched from the remote
//! question bank, and the rest of every subject's questions stream in
//! behind the running exam. A two-hour countdown ends the attempt, which
//! is then scored on whatever questions were actually delivered.
//!
//! ## Usage
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     jamb_cbt::logger::init();
//!     jamb_cbt::run().await
//! }
//! ```

pub mod app;
pub mod bank;
pub mod calc;
pub mod exam;
pub mod logger;
pub mod models;
pub mod terminal;
mod ui;

pub use app::{run, ExamApp, SharedApp};
pub use bank::QuestionBank;
pub use exam::score::{score, ScoreReport, SubjectScore};
pub use exam::session::{ExamSession, ExamStatus, EXAM_DURATION_SECS};
pub use models::{Question, Subject, AVAILABLE_SUBJECTS, MANDATORY_SUBJECT};
