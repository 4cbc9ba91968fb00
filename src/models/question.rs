use serde::Deserialize;

/// A single exam question as delivered by the question bank.
///
/// Identifiers are unique within one subject's fetch stream but not
/// globally. Everything except `id`, `question` and `answer` may be
/// missing from the API payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u64,
    pub question: String,
    #[serde(default)]
    pub option: Options,
    /// Canonical answer letter (`a`..`d`), case not guaranteed.
    pub answer: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub examtype: String,
    #[serde(default)]
    pub examyear: String,
}

/// The four lettered options. Any of them may be empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub b: String,
    #[serde(default)]
    pub c: String,
    #[serde(default)]
    pub d: String,
}

impl Options {
    /// Options in display order, skipping empty ones.
    pub fn lettered(&self) -> Vec<(char, &str)> {
        [
            ('a', self.a.as_str()),
            ('b', self.b.as_str()),
            ('c', self.c.as_str()),
            ('d', self.d.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .collect()
    }
}

impl Question {
    /// Whether `selected` matches the canonical answer, ignoring case.
    pub fn is_correct(&self, selected: &str) -> bool {
        selected.eq_ignore_ascii_case(self.answer.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_partial_payload() {
        let json = r#"{
            "id": 412,
            "question": "Choose the correct option.",
            "option": { "a": "first", "b": "second" },
            "answer": "a"
        }"#;

        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, 412);
        assert_eq!(q.option.c, "");
        assert!(q.image.is_empty());
        assert!(q.solution.is_empty());
    }

    #[test]
    fn test_lettered_skips_empty_options() {
        let q: Question = serde_json::from_str(
            r#"{"id": 1, "question": "?", "option": {"a": "yes", "d": "no"}, "answer": "d"}"#,
        )
        .unwrap();

        let lettered = q.option.lettered();
        assert_eq!(lettered.len(), 2);
        assert_eq!(lettered[0], ('a', "yes"));
        assert_eq!(lettered[1], ('d', "no"));
    }

    #[test]
    fn test_is_correct_ignores_case() {
        let q: Question =
            serde_json::from_str(r#"{"id": 1, "question": "?", "option": {}, "answer": "b"}"#)
                .unwrap();

        assert!(q.is_correct("B"));
        assert!(q.is_correct("b"));
        assert!(!q.is_correct("a"));
    }
}
