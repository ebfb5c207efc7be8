//! Change records and their derived, estimated form.
//!
//! A [`ChangeRecord`] is one unit of logged work (a commit, a manual entry).
//! Records are owned by whatever store supplied them and are never mutated
//! by the engine; every stage produces new values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of change a record describes.
///
/// Unrecognized or missing tags deserialize to [`Category::Unknown`] instead
/// of failing, so a record store that grows a new category degrades gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Feature,
    Bugfix,
    Improvement,
    Breaking,
    Security,
    Other,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Category {
    /// All recognized categories, in display order.
    pub const KNOWN: [Category; 6] = [
        Category::Feature,
        Category::Bugfix,
        Category::Improvement,
        Category::Breaking,
        Category::Security,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bugfix => "bugfix",
            Self::Improvement => "improvement",
            Self::Breaking => "breaking",
            Self::Security => "security",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "feature" => Self::Feature,
            "bugfix" => Self::Bugfix,
            "improvement" => Self::Improvement,
            "breaking" => Self::Breaking,
            "security" => Self::Security,
            "other" => Self::Other,
            _ => Self::Unknown,
        })
    }
}

/// Priority tag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        })
    }
}

/// One discrete unit of work as supplied by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Opaque identifier, unique within one processing run
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    /// Author or committer, searchable
    #[serde(default)]
    pub author: Option<String>,
    /// When the work happened (commit date); falls back to `recorded_at`
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    /// When the record entered the store
    pub recorded_at: DateTime<Utc>,
}

impl ChangeRecord {
    /// Create a record with medium priority and no optional fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category,
            priority: Priority::Medium,
            author: None,
            occurred_at: None,
            recorded_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Authoritative time for ordering, gap calculation and bucketing.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.occurred_at.unwrap_or(self.recorded_at)
    }

    /// Description text, empty when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A change record paired with its derived effort estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedRecord {
    #[serde(flatten)]
    pub record: ChangeRecord,
    /// Estimated minutes, always within `[5, 480]`
    pub estimated_minutes: u32,
}

impl EstimatedRecord {
    pub fn new(record: ChangeRecord, estimated_minutes: u32) -> Self {
        Self {
            record,
            estimated_minutes,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.record.timestamp()
    }
}
