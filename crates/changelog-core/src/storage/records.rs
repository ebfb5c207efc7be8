//! Record-store boundary.
//!
//! The engine assumes every timestamp it sees is valid. This module is
//! where serialized records are checked before they reach the pipeline:
//! unparseable timestamps and duplicate ids are rejected here.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{RecordError, Result};
use crate::record::{Category, ChangeRecord, Priority};

/// Anything that can hand the pipeline a list of change records.
pub trait RecordSource {
    /// Fetch all records. Order is irrelevant; the pipeline sorts.
    fn fetch(&self) -> Result<Vec<ChangeRecord>>;
}

impl RecordSource for Vec<ChangeRecord> {
    fn fetch(&self) -> Result<Vec<ChangeRecord>> {
        Ok(self.clone())
    }
}

/// A record as stored on disk, with timestamps still as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    pub recorded_at: String,
}

/// Parse an RFC 3339 timestamp, or `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl TryFrom<RawRecord> for ChangeRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(RecordError::MissingField {
                id: raw.id,
                field: "id",
            });
        }

        let recorded_at =
            parse_timestamp(&raw.recorded_at).ok_or_else(|| RecordError::InvalidTimestamp {
                id: raw.id.clone(),
                field: "recorded_at",
                value: raw.recorded_at.clone(),
            })?;

        let occurred_at = match raw.occurred_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_timestamp(text).ok_or_else(|| {
                RecordError::InvalidTimestamp {
                    id: raw.id.clone(),
                    field: "occurred_at",
                    value: text.to_string(),
                }
            })?),
        };

        Ok(ChangeRecord {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            category: raw.category,
            priority: raw.priority,
            author: raw.author,
            occurred_at,
            recorded_at,
        })
    }
}

/// Validate a batch of raw records. Fails on the first invalid record.
pub fn validate_records(raw: Vec<RawRecord>) -> Result<Vec<ChangeRecord>, RecordError> {
    let mut seen = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .map(|r| {
            if !seen.insert(r.id.clone()) {
                return Err(RecordError::DuplicateId(r.id));
            }
            ChangeRecord::try_from(r)
        })
        .collect()
}

/// A JSON file holding an array of [`RawRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonRecordFile {
    path: PathBuf,
}

impl JsonRecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse records from JSON text.
    pub fn parse(content: &str) -> Result<Vec<ChangeRecord>> {
        let raw: Vec<RawRecord> = serde_json::from_str(content)?;
        Ok(validate_records(raw)?)
    }
}

impl RecordSource for JsonRecordFile {
    fn fetch(&self) -> Result<Vec<ChangeRecord>> {
        let content = std::fs::read_to_string(&self.path)?;
        let records = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(id: &str, recorded_at: &str, occurred_at: Option<&str>) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            title: "Work".to_string(),
            description: None,
            category: Category::Feature,
            priority: Priority::Medium,
            author: None,
            occurred_at: occurred_at.map(str::to_string),
            recorded_at: recorded_at.to_string(),
        }
    }

    #[test]
    fn parses_supported_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-16T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-16T14:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-16 12:00:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2026-10-16T12:00:00 "), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn invalid_occurred_at_is_rejected() {
        let err = ChangeRecord::try_from(raw("a", "2026-10-16T12:00:00Z", Some("soon"))).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidTimestamp {
                id: "a".to_string(),
                field: "occurred_at",
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn invalid_recorded_at_is_rejected() {
        let err = ChangeRecord::try_from(raw("a", "not a date", None)).unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp { field: "recorded_at", .. }));
    }

    #[test]
    fn blank_occurred_at_is_absent() {
        let record = ChangeRecord::try_from(raw("a", "2026-10-16T12:00:00Z", Some("  "))).unwrap();
        assert!(record.occurred_at.is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![
            raw("a", "2026-10-16T12:00:00Z", None),
            raw("a", "2026-10-16T13:00:00Z", None),
        ];
        assert_eq!(
            validate_records(records).unwrap_err(),
            RecordError::DuplicateId("a".to_string())
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = ChangeRecord::try_from(raw(" ", "2026-10-16T12:00:00Z", None)).unwrap_err();
        assert!(matches!(err, RecordError::MissingField { field: "id", .. }));
    }

    #[test]
    fn json_file_source_loads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            indoc::indoc! {r#"
                [
                  {"id": "1", "title": "Add export", "category": "feature",
                   "recorded_at": "2026-10-16T12:00:00Z"},
                  {"id": "2", "title": "Docs", "category": "docs", "priority": "low",
                   "occurred_at": "2026-10-15 09:00:00", "recorded_at": "2026-10-16T12:00:00Z"}
                ]
            "#},
        )
        .unwrap();

        let records = JsonRecordFile::new(&path).fetch().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].category, Category::Unknown);
        assert_eq!(records[1].priority, Priority::Low);
        assert_eq!(
            records[1].timestamp(),
            Utc.with_ymd_and_hms(2026, 10, 15, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_category_uses_neutral_multiplier() {
        let records = JsonRecordFile::parse(
            r#"[{"id": "a", "title": "Work", "recorded_at": "2026-10-16T11:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(records[0].category, Category::Unknown);
        assert_eq!(crate::estimate(&records[0], None), 30);

        let summary = crate::aggregate(&crate::pipeline::prepare(
            &records,
            &crate::ChangelogQuery::new(),
        ));
        assert_eq!(summary.minutes_for(Category::Unknown), 30);
        assert_eq!(summary.minutes_for(Category::Other), 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["minutes_by_category"]["unknown"], 30);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonRecordFile::new("/nonexistent/records.json").fetch().unwrap_err();
        assert!(matches!(err, crate::error::CoreError::Io(_)));
    }

    #[test]
    fn in_memory_source_returns_records() {
        let records = vec![ChangeRecord::new("a", "Work", Category::Other, Utc::now())];
        assert_eq!(records.fetch().unwrap(), records);
    }
}
