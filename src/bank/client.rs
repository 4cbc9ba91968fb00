//! HTTP client for the remote question bank.
//!
//! The bank serves one question per request, so a batch is assembled by
//! fanning out single-question fetches in bounded chunks. The client is
//! infallible by contract: a failed fetch simply contributes nothing and
//! the batch returns whatever succeeded, possibly nothing at all.

use std::collections::HashSet;
use std::future::Future;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::debug;

use crate::models::Question;

/// Maximum number of single-question requests in flight at once.
pub const CONCURRENCY_LIMIT: usize = 30;

const API_URL: &str = "https://questions.aloc.com.ng/api/v2/q";
const ACCESS_TOKEN: &str = "ALOC-c30ed506ee19b2885ab8";

/// JSON envelope around a single delivered question.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: u16,
    #[serde(default)]
    data: Option<Question>,
}

/// Client for the remote question bank.
pub struct QuestionBank {
    http: reqwest::Client,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch up to `count` distinct questions for a subject.
    ///
    /// Requests are issued in chunks of at most [`CONCURRENCY_LIMIT`]; a
    /// chunk settles completely before the next one is issued. Results are
    /// deduplicated by question id within this call. `count == 0` issues no
    /// requests.
    pub async fn fetch_batch(&self, subject: &str, count: usize) -> Vec<Question> {
        self.fetch_batch_with_progress(subject, count, |_| {}).await
    }

    /// Like [`fetch_batch`](Self::fetch_batch), reporting the cumulative
    /// number of unique questions after each chunk.
    pub async fn fetch_batch_with_progress<P>(
        &self,
        subject: &str,
        count: usize,
        progress: P,
    ) -> Vec<Question>
    where
        P: FnMut(usize),
    {
        batch_fetch(count, CONCURRENCY_LIMIT, || self.fetch_single(subject), progress).await
    }

    /// Fetch one question. Any failure yields `None`; nothing is retried.
    async fn fetch_single(&self, subject: &str) -> Option<Question> {
        let response = match self
            .http
            .get(API_URL)
            .query(&[("subject", subject)])
            .header("AccessToken", ACCESS_TOKEN)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(subject, error = %e, "question request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(subject, status = %response.status(), "question bank rejected the request");
            return None;
        }

        let envelope: Envelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(subject, error = %e, "question payload did not decode");
                return None;
            }
        };

        if envelope.status == 200 { envelope.data } else { None }
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Chunked fetch engine behind [`QuestionBank::fetch_batch`].
///
/// Generic over the fetch-one future so tests can drive it without a
/// network.
async fn batch_fetch<F, Fut, P>(count: usize, limit: usize, fetch_one: F, mut progress: P) -> Vec<Question>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Option<Question>>,
    P: FnMut(usize),
{
    let mut questions = Vec::new();
    let mut seen = HashSet::new();

    for chunk in chunk_sizes(count, limit) {
        let results = join_all((0..chunk).map(|_| fetch_one())).await;

        for question in results.into_iter().flatten() {
            if seen.insert(question.id) {
                questions.push(question);
            }
        }

        progress(questions.len());
    }

    questions
}

/// Partition `count` into chunk sizes of at most `limit`.
fn chunk_sizes(count: usize, limit: usize) -> Vec<usize> {
    let mut chunks = Vec::new();
    let mut remaining = count;

    while remaining > 0 {
        let size = remaining.min(limit);
        chunks.push(size);
        remaining -= size;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::models::Options;

    fn question(id: u64) -> Question {
        Question {
            id,
            question: format!("question {}", id),
            option: Options::default(),
            answer: "a".to_string(),
            image: String::new(),
            solution: String::new(),
            section: String::new(),
            examtype: String::new(),
            examyear: String::new(),
        }
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(chunk_sizes(70, 30), vec![30, 30, 10]);
        assert_eq!(chunk_sizes(30, 30), vec![30]);
        assert_eq!(chunk_sizes(5, 30), vec![5]);
        assert!(chunk_sizes(0, 30).is_empty());
    }

    #[tokio::test]
    async fn test_batch_returns_distinct_questions() {
        let next_id = AtomicU64::new(0);

        let batch = batch_fetch(
            5,
            30,
            || {
                let id = next_id.fetch_add(1, Ordering::SeqCst);
                async move { Some(question(id)) }
            },
            |_| {},
        )
        .await;

        assert_eq!(batch.len(), 5);
        let ids: HashSet<u64> = batch.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_batch_deduplicates_within_call() {
        let calls = AtomicU64::new(0);

        // Only three distinct ids exist, however many times we ask.
        let batch = batch_fetch(
            10,
            30,
            || {
                let id = calls.fetch_add(1, Ordering::SeqCst) % 3;
                async move { Some(question(id)) }
            },
            |_| {},
        )
        .await;

        assert_eq!(batch.len(), 3);
    }

    #[tokio::test]
    async fn test_batch_drops_failed_fetches_silently() {
        let calls = AtomicU64::new(0);

        let batch = batch_fetch(
            6,
            30,
            || {
                let id = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if id % 2 == 0 {
                        Some(question(id))
                    } else {
                        None
                    }
                }
            },
            |_| {},
        )
        .await;

        assert_eq!(batch.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_count_issues_no_requests() {
        let calls = AtomicU64::new(0);

        let batch = batch_fetch(
            0,
            30,
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Some(question(1)) }
            },
            |_| {},
        )
        .await;

        assert!(batch.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_progress_reports_cumulative_count_per_chunk() {
        let next_id = AtomicU64::new(0);
        let mut reports = Vec::new();

        batch_fetch(
            70,
            30,
            || {
                let id = next_id.fetch_add(1, Ordering::SeqCst);
                async move { Some(question(id)) }
            },
            |n| reports.push(n),
        )
        .await;

        assert_eq!(reports, vec![30, 60, 70]);
    }

    #[test]
    fn test_envelope_decodes_bank_response() {
        let json = r#"{
            "subject": "english",
            "status": 200,
            "data": {
                "id": 17,
                "question": "Pick the odd one out.",
                "option": { "a": "run", "b": "walk", "c": "sleep", "d": "jog" },
                "answer": "c"
            }
        }"#;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.data.unwrap().id, 17);
    }

    #[test]
    fn test_envelope_tolerates_error_response() {
        let envelope: Envelope = serde_json::from_str(r#"{"status": 404}"#).unwrap();
        assert_eq!(envelope.status, 404);
        assert!(envelope.data.is_none());
    }
}
