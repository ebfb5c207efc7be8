//! Commit message classification.
//!
//! Turns a raw commit (as returned by a history import) into change-record
//! metadata: title, description, category and priority. Fetching commits is
//! the caller's job; this module only interprets messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Category, ChangeRecord, Priority};

/// Titles longer than this are truncated with a trailing `...`.
pub const MAX_TITLE_CHARS: usize = 100;

/// Length of the abbreviated sha used as record id.
pub const SHORT_SHA_LEN: usize = 7;

/// A commit as supplied by an external history import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Metadata extracted from a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
}

/// Classify a commit message.
pub fn parse_commit_message(message: &str) -> ParsedMessage {
    if message.starts_with("Merge") || message.starts_with("merge") {
        return ParsedMessage {
            title: message.lines().next().unwrap_or_default().to_string(),
            description: message.to_string(),
            category: Category::Other,
            priority: Priority::Low,
        };
    }

    let lines: Vec<&str> = message.lines().filter(|l| !l.trim().is_empty()).collect();
    let first_line = lines.first().copied().unwrap_or(message);

    let title = if first_line.chars().count() > MAX_TITLE_CHARS {
        let head: String = first_line.chars().take(MAX_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        first_line.to_string()
    };

    let rest = lines.get(1..).unwrap_or_default().join("\n");
    let rest = rest.trim();
    let description = if rest.is_empty() { first_line } else { rest }.to_string();

    let lower = message.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    let (category, mut priority) = if has(&["feat", "feature", "add"]) {
        (Category::Feature, Priority::Medium)
    } else if has(&["fix", "bug"]) {
        (Category::Bugfix, Priority::High)
    } else if has(&["improve", "refactor", "optimize"]) {
        (Category::Improvement, Priority::Medium)
    } else if has(&["break", "breaking"]) {
        (Category::Breaking, Priority::High)
    } else if has(&["security", "sec"]) {
        (Category::Security, Priority::High)
    } else {
        (Category::Other, Priority::Medium)
    };

    if has(&["[high]", "urgent", "critical"]) {
        priority = Priority::High;
    } else if has(&["[low]", "minor"]) {
        priority = Priority::Low;
    }

    ParsedMessage {
        title,
        description,
        category,
        priority,
    }
}

impl CommitInfo {
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    /// Convert into a change record. The commit date becomes `occurred_at`.
    pub fn into_change_record(self, recorded_at: DateTime<Utc>) -> ChangeRecord {
        let parsed = parse_commit_message(&self.message);
        let mut record = ChangeRecord::new(self.short_sha(), parsed.title, parsed.category, recorded_at)
            .with_description(parsed.description)
            .with_priority(parsed.priority)
            .with_occurred_at(self.date);
        record.author = self.author;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn merge_commits_are_low_priority_other() {
        let parsed = parse_commit_message("Merge branch 'main' into feature/x\n\nConflicts fixed");
        assert_eq!(parsed.title, "Merge branch 'main' into feature/x");
        assert_eq!(parsed.category, Category::Other);
        assert_eq!(parsed.priority, Priority::Low);
        assert!(parsed.description.contains("Conflicts fixed"));
    }

    #[test]
    fn title_and_description_split() {
        let parsed = parse_commit_message("Add invoice export\n\nSupports CSV\nand XLSX");
        assert_eq!(parsed.title, "Add invoice export");
        assert_eq!(parsed.description, "Supports CSV\nand XLSX");
        assert_eq!(parsed.category, Category::Feature);
        assert_eq!(parsed.priority, Priority::Medium);
    }

    #[test]
    fn single_line_reuses_title_as_description() {
        let parsed = parse_commit_message("Tweak wording");
        assert_eq!(parsed.description, "Tweak wording");
        assert_eq!(parsed.category, Category::Other);
    }

    #[test]
    fn long_titles_are_truncated() {
        let message = "x".repeat(150);
        let parsed = parse_commit_message(&message);
        assert_eq!(parsed.title.chars().count(), MAX_TITLE_CHARS + 3);
        assert!(parsed.title.ends_with("..."));
    }

    #[test]
    fn category_precedence() {
        // "add" wins over "fix" because feature rules are checked first
        assert_eq!(parse_commit_message("Add fix for login").category, Category::Feature);
        assert_eq!(parse_commit_message("Fix login redirect").category, Category::Bugfix);
        assert_eq!(parse_commit_message("Fix login redirect").priority, Priority::High);
        assert_eq!(parse_commit_message("Optimize query plan").category, Category::Improvement);
        assert_eq!(parse_commit_message("Breaking: drop v1 api").category, Category::Breaking);
        assert_eq!(parse_commit_message("Rotate security keys").category, Category::Security);
    }

    #[test]
    fn priority_markers_override() {
        assert_eq!(parse_commit_message("Update deps [high]").priority, Priority::High);
        assert_eq!(parse_commit_message("Fix minor layout glitch").priority, Priority::Low);
        assert_eq!(parse_commit_message("Tweak copy [low]").priority, Priority::Low);
    }

    #[test]
    fn commit_converts_to_record() {
        let date = Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
        let imported = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        let commit = CommitInfo {
            sha: "0123456789abcdef".to_string(),
            message: "Fix invoice totals".to_string(),
            author: Some("dana".to_string()),
            date,
            url: None,
        };
        let record = commit.into_change_record(imported);
        assert_eq!(record.id, "0123456");
        assert_eq!(record.category, Category::Bugfix);
        assert_eq!(record.timestamp(), date);
        assert_eq!(record.recorded_at, imported);
        assert_eq!(record.author.as_deref(), Some("dana"));
    }

    #[test]
    fn short_sha_handles_short_input() {
        let commit = CommitInfo {
            sha: "abc".to_string(),
            message: "x".to_string(),
            author: None,
            date: Utc::now(),
            url: None,
        };
        assert_eq!(commit.short_sha(), "abc");
    }
}
