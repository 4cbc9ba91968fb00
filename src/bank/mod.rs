//! Question bank access.

mod client;

pub use client::{QuestionBank, CONCURRENCY_LIMIT};
