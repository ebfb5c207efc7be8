//! Summary statistics over estimated records.
//!
//! Totals are computed from the flat record list rather than from buckets,
//! so dashboard tiles stay correct regardless of how the timeline is cut.

mod summary;

pub use summary::{aggregate, AggregateSummary};
