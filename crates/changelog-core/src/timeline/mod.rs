//! Timeline partitioning of estimated records.
//!
//! This module provides:
//! - Recency buckets (Today, Yesterday, This Week, This Month, Older)
//! - Minute formatting for bucket headers and summary tiles

mod bucket;
mod format;

pub use bucket::{classify, partition, BucketKind, TimeBucket};
pub use format::format_minutes;
