mod question;
pub mod subject;

pub use question::{Options, Question};
pub use subject::{Subject, AVAILABLE_SUBJECTS, MANDATORY_SUBJECT, SUBJECTS_PER_EXAM};
