//! Recency buckets for the changelog timeline.
//!
//! Calendar dates are evaluated in the time zone carried by `now`, so the
//! caller decides what "today" means. Weeks start on Monday (ISO 8601).

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::record::EstimatedRecord;

/// Named recency partition. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    Older,
}

impl BucketKind {
    /// All buckets in display order.
    pub const ORDER: [BucketKind; 5] = [
        BucketKind::Today,
        BucketKind::Yesterday,
        BucketKind::ThisWeek,
        BucketKind::ThisMonth,
        BucketKind::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::Older => "Older",
        }
    }

    /// Human-readable range shown under the bucket header.
    pub fn date_range(&self, today: NaiveDate) -> String {
        match self {
            Self::Today => long_date(today),
            Self::Yesterday => today
                .pred_opt()
                .map(long_date)
                .unwrap_or_else(|| "Yesterday".to_string()),
            Self::ThisWeek => "Earlier this week".to_string(),
            Self::ThisMonth => today.format("%B %Y").to_string(),
            Self::Older => "Previous months".to_string(),
        }
    }

    /// Classify a calendar date relative to `today`. First match wins.
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            Self::Today
        } else if Some(date) == today.pred_opt() {
            Self::Yesterday
        } else if date.iso_week() == today.iso_week() {
            Self::ThisWeek
        } else if date.year() == today.year() && date.month() == today.month() {
            Self::ThisMonth
        } else {
            Self::Older
        }
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// One non-empty recency bucket of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub kind: BucketKind,
    pub label: String,
    pub date_range: String,
    /// Members in input (newest-first) order
    pub records: Vec<EstimatedRecord>,
    pub total_minutes: u64,
}

impl TimeBucket {
    fn new(kind: BucketKind, today: NaiveDate, records: Vec<EstimatedRecord>) -> Self {
        let total_minutes = records.iter().map(|r| r.estimated_minutes as u64).sum();
        Self {
            kind,
            label: kind.label().to_string(),
            date_range: kind.date_range(today),
            records,
            total_minutes,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Classify a timestamp relative to `now`, using `now`'s time zone.
pub fn classify<Tz: TimeZone>(at: DateTime<Utc>, now: &DateTime<Tz>) -> BucketKind {
    let date = at.with_timezone(&now.timezone()).date_naive();
    BucketKind::for_date(date, now.date_naive())
}

/// Partition estimated records into the non-empty recency buckets.
///
/// Expects `records` sorted newest first; member order is preserved as given.
pub fn partition<Tz: TimeZone>(records: &[EstimatedRecord], now: &DateTime<Tz>) -> Vec<TimeBucket> {
    let today = now.date_naive();
    let mut groups: [Vec<EstimatedRecord>; 5] = Default::default();

    for record in records {
        let kind = classify(record.timestamp(), now);
        groups[kind as usize].push(record.clone());
    }

    BucketKind::ORDER
        .into_iter()
        .zip(groups)
        .filter(|(_, members)| !members.is_empty())
        .map(|(kind, members)| TimeBucket::new(kind, today, members))
        .collect()
}
