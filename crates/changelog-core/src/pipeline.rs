//! Orchestration: sort, filter, estimate, partition, aggregate.
//!
//! The pipeline is a pure single-pass transformation and is meant to be
//! re-run from scratch whenever the record set or the query changes.
//! Filtering happens before estimation so that gap blending only ever
//! sees neighbours that survived the filter.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::estimator;
use crate::record::{Category, ChangeRecord, EstimatedRecord};
use crate::stats::{aggregate, AggregateSummary};
use crate::timeline::{partition, TimeBucket};

/// Which records take part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogQuery {
    /// Case-insensitive substring over title, description and author
    #[serde(default)]
    pub search: Option<String>,
    /// Only keep records of this category
    #[serde(default)]
    pub category: Option<Category>,
}

impl ChangelogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether `record` passes this query. An empty search term matches all.
    pub fn matches(&self, record: &ChangeRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }

        match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                record.title.to_lowercase().contains(&needle)
                    || record
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || record
                        .author
                        .as_deref()
                        .is_some_and(|a| a.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Output of one pipeline run. Presentation renders it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub buckets: Vec<TimeBucket>,
    pub summary: AggregateSummary,
}

impl PipelineResult {
    /// All estimated records in timeline order.
    pub fn records(&self) -> impl Iterator<Item = &EstimatedRecord> {
        self.buckets.iter().flat_map(|b| b.records.iter())
    }

    pub fn find(&self, id: &str) -> Option<&EstimatedRecord> {
        self.records().find(|r| r.id() == id)
    }
}

/// Sort newest first; equal timestamps are ordered by ascending id.
pub fn sort_chronologically(records: &[ChangeRecord]) -> Vec<ChangeRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.timestamp()
            .cmp(&a.timestamp())
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// Estimate each record of a newest-first sequence, pairing it with the
/// next (older) record as its neighbour.
pub fn estimate_sequence(sorted: &[ChangeRecord]) -> Vec<EstimatedRecord> {
    let neighbours = sorted.iter().skip(1).map(Some).chain(std::iter::once(None));
    sorted
        .iter()
        .zip(neighbours)
        .map(|(record, previous)| {
            EstimatedRecord::new(record.clone(), estimator::estimate(record, previous))
        })
        .collect()
}

/// Sort, then keep the records that pass `query`.
pub fn select(records: &[ChangeRecord], query: &ChangelogQuery) -> Vec<ChangeRecord> {
    sort_chronologically(records)
        .into_iter()
        .filter(|r| query.matches(r))
        .collect()
}

/// Sort, filter and estimate: the shared front half of every run.
pub fn prepare(records: &[ChangeRecord], query: &ChangelogQuery) -> Vec<EstimatedRecord> {
    let filtered = select(records, query);

    tracing::debug!(
        input = records.len(),
        kept = filtered.len(),
        search = ?query.search,
        category = ?query.category,
        "filtered change records"
    );

    estimate_sequence(&filtered)
}

/// Run the full pipeline for `query` relative to `now`.
pub fn run<Tz: TimeZone>(
    records: &[ChangeRecord],
    query: &ChangelogQuery,
    now: &DateTime<Tz>,
) -> PipelineResult {
    let estimated = prepare(records, query);
    let summary = aggregate(&estimated);
    let buckets = partition(&estimated, now);

    tracing::debug!(
        buckets = buckets.len(),
        total_minutes = summary.total_minutes,
        "timeline computed"
    );

    PipelineResult { buckets, summary }
}

/// Run the pipeline with only a search term.
pub fn run_search<Tz: TimeZone>(
    records: &[ChangeRecord],
    search: &str,
    now: &DateTime<Tz>,
) -> PipelineResult {
    run(records, &ChangelogQuery::new().with_search(search), now)
}

/// Breakdown of one record's estimate as it appears in a run for `query`.
///
/// Returns `None` if the record does not survive the query.
pub fn explain_in_context(
    records: &[ChangeRecord],
    query: &ChangelogQuery,
    id: &str,
) -> Option<estimator::EstimateBreakdown> {
    let filtered = select(records, query);
    let index = filtered.iter().position(|r| r.id == id)?;
    Some(estimator::explain(&filtered[index], filtered.get(index + 1)))
}
