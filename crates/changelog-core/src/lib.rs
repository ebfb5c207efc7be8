//! # Changelog Core Library
//!
//! This library provides the development-effort estimation and timeline
//! aggregation engine behind the changelog console. Given change records
//! (commits or manually logged entries) with loose metadata, it estimates
//! how long each one plausibly took, groups them into recency buckets and
//! totals the estimates for dashboard tiles.
//!
//! ## Architecture
//!
//! - **Estimator**: pure function of one record and its older neighbour
//! - **Timeline**: partitions estimated records into Today, Yesterday,
//!   This Week, This Month and Older
//! - **Stats**: single-pass totals per category
//! - **Pipeline**: sort, filter, estimate, partition and aggregate in one run
//! - **Storage**: TOML configuration and validated JSON record files
//!
//! ## Key Components
//!
//! - [`run`]: the entry point callers invoke
//! - [`estimate`]: the per-record heuristic
//! - [`ChangeRecord`]: input record shape
//! - [`Config`]: application configuration management

pub mod commit;
pub mod error;
pub mod estimator;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod stats;
pub mod storage;
pub mod timeline;

pub use commit::{parse_commit_message, CommitInfo, ParsedMessage};
pub use error::{ConfigError, CoreError, RecordError};
pub use estimator::{estimate, explain, EstimateBreakdown};
pub use pipeline::{explain_in_context, run, run_search, ChangelogQuery, PipelineResult};
pub use record::{Category, ChangeRecord, EstimatedRecord, Priority};
pub use report::render_report;
pub use stats::{aggregate, AggregateSummary};
pub use storage::{Config, JsonRecordFile, RecordSource};
pub use timeline::{format_minutes, partition, BucketKind, TimeBucket};
