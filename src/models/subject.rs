/// Static catalog entry for an examinable subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    /// How many questions a full exam draws for this subject.
    pub question_count: usize,
}

/// The subject every candidate sits.
pub const MANDATORY_SUBJECT: &str = "english";

/// Number of subjects in one exam sitting.
pub const SUBJECTS_PER_EXAM: usize = 4;

/// The full catalog. English is mandatory and always listed first.
pub const AVAILABLE_SUBJECTS: [Subject; 17] = [
    Subject { id: "english", name: "English Language", question_count: 60 },
    Subject { id: "mathematics", name: "Mathematics", question_count: 40 },
    Subject { id: "commerce", name: "Commerce", question_count: 40 },
    Subject { id: "accounting", name: "Accounting", question_count: 40 },
    Subject { id: "biology", name: "Biology", question_count: 40 },
    Subject { id: "physics", name: "Physics", question_count: 40 },
    Subject { id: "chemistry", name: "Chemistry", question_count: 40 },
    Subject { id: "englishlit", name: "Literature in English", question_count: 40 },
    Subject { id: "government", name: "Government", question_count: 40 },
    Subject { id: "crk", name: "CRK", question_count: 40 },
    Subject { id: "geography", name: "Geography", question_count: 40 },
    Subject { id: "economics", name: "Economics", question_count: 40 },
    Subject { id: "irk", name: "IRK", question_count: 40 },
    Subject { id: "civiledu", name: "Civic Education", question_count: 40 },
    Subject { id: "insurance", name: "Insurance", question_count: 40 },
    Subject { id: "currentaffairs", name: "Current Affairs", question_count: 40 },
    Subject { id: "history", name: "History", question_count: 40 },
];

/// Look up a subject descriptor by id.
pub fn find(id: &str) -> Option<&'static Subject> {
    AVAILABLE_SUBJECTS.iter().find(|s| s.id == id)
}

/// Display name for a subject id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    find(id).map(|s| s.name).unwrap_or(id)
}
