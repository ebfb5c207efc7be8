//! Keyword overrides applied after the content and gap signals.

use crate::record::ChangeRecord;

/// Words that mark a change as a quick fix; the estimate is capped.
pub const QUICK_FIX_KEYWORDS: [&str; 7] = [
    "typo", "minor", "small", "quick", "hotfix", "readme", "comment",
];

/// Words that mark a change as major work; the estimate is floored.
pub const MAJOR_WORK_KEYWORDS: [&str; 6] = [
    "refactor",
    "redesign",
    "migrate",
    "overhaul",
    "complete",
    "implement",
];

/// Cap applied when a quick-fix keyword is present.
pub const QUICK_FIX_CAP_MINUTES: f64 = 15.0;

/// Floor applied when a major-work keyword is present.
pub const MAJOR_WORK_FLOOR_MINUTES: f64 = 120.0;

/// Lowercased title and description of one record, built once per estimate.
pub(crate) struct SearchableText {
    title: String,
    description: String,
}

impl SearchableText {
    pub(crate) fn of(record: &ChangeRecord) -> Self {
        Self {
            title: record.title.to_lowercase(),
            description: record.description_text().to_lowercase(),
        }
    }

    /// True if any keyword appears as a substring of the title or description.
    pub(crate) fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .any(|kw| self.title.contains(kw) || self.description.contains(kw))
    }
}

/// Whether the record reads like a quick fix.
pub fn is_quick_fix(record: &ChangeRecord) -> bool {
    SearchableText::of(record).mentions_any(&QUICK_FIX_KEYWORDS)
}

/// Whether the record reads like major work.
pub fn is_major_work(record: &ChangeRecord) -> bool {
    SearchableText::of(record).mentions_any(&MAJOR_WORK_KEYWORDS)
}
