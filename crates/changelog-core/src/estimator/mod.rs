//! Effort estimation for a single change record.
//!
//! There is no ground-truth duration for a change, so the estimate is
//! assembled from the metadata that is available:
//!
//! 1. A base value from the description length (a complexity proxy)
//! 2. Category and priority multipliers
//! 3. Blending with the observed gap to the previous (older) record
//! 4. Keyword overrides: quick fixes are capped, major work is floored
//! 5. A final clamp to `[5, 480]` minutes
//!
//! [`estimate`] is a pure function of the record and at most one neighbour.
//! It never fails; missing fields fall back to neutral defaults.

mod keywords;

pub use keywords::{
    is_major_work, is_quick_fix, MAJOR_WORK_FLOOR_MINUTES, MAJOR_WORK_KEYWORDS,
    QUICK_FIX_CAP_MINUTES, QUICK_FIX_KEYWORDS,
};

use keywords::SearchableText;
use serde::{Deserialize, Serialize};

use crate::record::{Category, ChangeRecord, Priority};

/// Lower bound of any estimate, in minutes.
pub const MIN_ESTIMATE_MINUTES: u32 = 5;

/// Upper bound of any estimate, in minutes (one working day).
pub const MAX_ESTIMATE_MINUTES: u32 = 480;

/// Gaps at or beyond this many minutes are treated as a break and ignored.
pub const GAP_WINDOW_MINUTES: i64 = 240;

/// Weight of the observed gap when blending; the content estimate gets the rest.
pub const GAP_WEIGHT: f64 = 0.6;

/// Base minutes from description length. Highest threshold met wins.
pub fn base_minutes(description_length: usize) -> f64 {
    if description_length > 500 {
        90.0
    } else if description_length > 200 {
        60.0
    } else if description_length > 100 {
        45.0
    } else {
        30.0
    }
}

/// Description length as UTF-16 code units, so characters outside the
/// Basic Multilingual Plane (emoji) count twice.
pub fn description_length(record: &ChangeRecord) -> usize {
    record.description_text().encode_utf16().count()
}

/// Multiplier for the kind of change.
pub fn category_multiplier(category: Category) -> f64 {
    match category {
        Category::Feature => 1.5,
        Category::Bugfix => 1.2,
        Category::Improvement => 1.0,
        Category::Breaking => 1.8,
        Category::Security => 1.4,
        Category::Other => 0.8,
        Category::Unknown => 1.0,
    }
}

/// Multiplier for the priority tag, applied after the category multiplier.
pub fn priority_multiplier(priority: Priority) -> f64 {
    match priority {
        Priority::High => 1.3,
        Priority::Low => 0.7,
        Priority::Medium | Priority::Unknown => 1.0,
    }
}

/// Absolute distance between two records in whole minutes (truncated).
pub fn gap_minutes(record: &ChangeRecord, previous: &ChangeRecord) -> i64 {
    (record.timestamp() - previous.timestamp()).num_minutes().abs()
}

/// Blend an observed gap into a content-derived estimate.
///
/// Returns `None` when the gap carries no information: zero (simultaneous
/// records) or at least [`GAP_WINDOW_MINUTES`] (overnight or a break).
pub fn blend_with_gap(content_minutes: f64, gap: i64) -> Option<f64> {
    if gap > 0 && gap < GAP_WINDOW_MINUTES {
        Some((gap as f64 * GAP_WEIGHT + content_minutes * (1.0 - GAP_WEIGHT)).round())
    } else {
        None
    }
}

/// Every intermediate value behind one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    /// Description length in UTF-16 code units
    pub description_length: usize,
    pub base_minutes: f64,
    pub category_multiplier: f64,
    pub priority_multiplier: f64,
    /// Base times both multipliers, before any neighbour or keyword signal
    pub content_minutes: f64,
    /// Gap to the previous record, if one was supplied
    pub gap_minutes: Option<i64>,
    /// Whether the gap was blended into the estimate
    pub gap_blended: bool,
    /// Whether the quick-fix cap fired
    pub quick_fix: bool,
    /// Whether the major-work floor fired
    pub major_work: bool,
    /// Final estimate, clamped to `[5, 480]`
    pub minutes: u32,
}

/// Explain how the estimate for `record` is derived.
///
/// `previous` is the chronologically adjacent older record of the same run,
/// or `None` for the oldest record.
pub fn explain(record: &ChangeRecord, previous: Option<&ChangeRecord>) -> EstimateBreakdown {
    let description_length = description_length(record);
    let base = base_minutes(description_length);
    let category_mult = category_multiplier(record.category);
    let priority_mult = priority_multiplier(record.priority);
    let content_minutes = base * category_mult * priority_mult;

    let mut minutes = content_minutes;

    let gap = previous.map(|prev| gap_minutes(record, prev));
    let blended = gap.and_then(|g| blend_with_gap(minutes, g));
    if let Some(value) = blended {
        minutes = value;
    }

    let text = SearchableText::of(record);

    let quick_fix = text.mentions_any(&QUICK_FIX_KEYWORDS);
    if quick_fix {
        minutes = minutes.min(QUICK_FIX_CAP_MINUTES);
    }

    // Applied last so it wins over the quick-fix cap.
    let major_work = text.mentions_any(&MAJOR_WORK_KEYWORDS);
    if major_work {
        minutes = minutes.max(MAJOR_WORK_FLOOR_MINUTES);
    }

    let minutes = clamp_minutes(minutes);

    tracing::trace!(
        id = %record.id,
        base,
        content_minutes,
        ?gap,
        quick_fix,
        major_work,
        minutes,
        "estimated record"
    );

    EstimateBreakdown {
        description_length,
        base_minutes: base,
        category_multiplier: category_mult,
        priority_multiplier: priority_mult,
        content_minutes,
        gap_minutes: gap,
        gap_blended: blended.is_some(),
        quick_fix,
        major_work,
        minutes,
    }
}

/// Estimate minutes spent on `record`.
pub fn estimate(record: &ChangeRecord, previous: Option<&ChangeRecord>) -> u32 {
    explain(record, previous).minutes
}

fn clamp_minutes(minutes: f64) -> u32 {
    let rounded = minutes.round();
    if rounded.is_nan() {
        return MIN_ESTIMATE_MINUTES;
    }
    rounded.clamp(MIN_ESTIMATE_MINUTES as f64, MAX_ESTIMATE_MINUTES as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn record(category: Category, priority: Priority, description_len: usize) -> ChangeRecord {
        ChangeRecord::new("r1", "Update billing page", category, noon())
            .with_priority(priority)
            .with_description("x".repeat(description_len))
    }

    #[test]
    fn base_thresholds_are_not_cumulative() {
        assert_eq!(base_minutes(0), 30.0);
        assert_eq!(base_minutes(100), 30.0);
        assert_eq!(base_minutes(101), 45.0);
        assert_eq!(base_minutes(200), 45.0);
        assert_eq!(base_minutes(201), 60.0);
        assert_eq!(base_minutes(500), 60.0);
        assert_eq!(base_minutes(501), 90.0);
    }

    #[test]
    fn short_other_medium_without_neighbour() {
        let r = record(Category::Other, Priority::Medium, 50);
        assert_eq!(estimate(&r, None), 24);
    }

    #[test]
    fn long_breaking_high_without_neighbour() {
        let r = record(Category::Breaking, Priority::High, 600);
        assert_eq!(estimate(&r, None), 211);
    }

    #[test]
    fn hotfix_title_caps_estimate() {
        let r = ChangeRecord::new("r1", "hotfix: login redirect", Category::Feature, noon())
            .with_priority(Priority::High)
            .with_description("0123456789");
        let breakdown = explain(&r, None);
        assert!((breakdown.content_minutes - 58.5).abs() < 1e-9);
        assert!(breakdown.quick_fix);
        assert_eq!(breakdown.minutes, 15);
    }

    #[test]
    fn blend_weights_gap_and_content() {
        assert_eq!(blend_with_gap(40.0, 90), Some(70.0));
        assert_eq!(blend_with_gap(40.0, 0), None);
        assert_eq!(blend_with_gap(40.0, 240), None);
        assert_eq!(blend_with_gap(40.0, 239), Some(159.0));
    }

    #[test]
    fn neighbour_within_window_is_blended() {
        // improvement/high: 30 * 1.0 * 1.3 = 39, gap 90 -> round(54 + 15.6) = 70
        let prev = record(Category::Other, Priority::Medium, 0);
        let current = ChangeRecord::new("r2", "Update billing page", Category::Improvement, noon())
            .with_priority(Priority::High)
            .with_occurred_at(noon() + Duration::minutes(90));
        let breakdown = explain(&current, Some(&prev));
        assert_eq!(breakdown.gap_minutes, Some(90));
        assert!(breakdown.gap_blended);
        assert_eq!(breakdown.minutes, 70);
    }

    #[test]
    fn gap_direction_does_not_matter() {
        let a = record(Category::Feature, Priority::Medium, 0);
        let b = a.clone().with_occurred_at(noon() - Duration::minutes(30));
        let c = a.clone().with_occurred_at(noon() + Duration::minutes(30));
        assert_eq!(estimate(&b, Some(&a)), estimate(&c, Some(&a)));
    }

    #[test]
    fn partial_minutes_are_truncated() {
        let prev = record(Category::Other, Priority::Medium, 0);
        let current = prev
            .clone()
            .with_occurred_at(noon() + Duration::seconds(59));
        // 59 seconds is a zero-minute gap, which is not informative
        let breakdown = explain(&current, Some(&prev));
        assert_eq!(breakdown.gap_minutes, Some(0));
        assert!(!breakdown.gap_blended);
        assert_eq!(breakdown.minutes, 24);
    }

    #[test]
    fn gaps_outside_window_keep_content_estimate() {
        let prev = record(Category::Feature, Priority::Medium, 0);
        let without = estimate(&prev, None);
        for gap in [0, 240, 241, 600, 60 * 24 * 7] {
            let current = prev.clone().with_occurred_at(noon() + Duration::minutes(gap));
            assert_eq!(estimate(&current, Some(&prev)), without, "gap {gap}");
        }
    }

    #[test]
    fn major_work_wins_over_quick_fix() {
        let r = ChangeRecord::new("r1", "Quick refactor of auth", Category::Other, noon())
            .with_priority(Priority::Low);
        let breakdown = explain(&r, None);
        assert!(breakdown.quick_fix);
        assert!(breakdown.major_work);
        assert_eq!(breakdown.minutes, 120);
    }

    #[test]
    fn unknown_tags_use_neutral_multipliers() {
        let r = record(Category::Unknown, Priority::Unknown, 0);
        let breakdown = explain(&r, None);
        assert_eq!(breakdown.category_multiplier, 1.0);
        assert_eq!(breakdown.priority_multiplier, 1.0);
        assert_eq!(breakdown.minutes, 30);
    }

    #[test]
    fn clamp_enforces_bounds() {
        assert_eq!(clamp_minutes(1.0), MIN_ESTIMATE_MINUTES);
        assert_eq!(clamp_minutes(4.4), MIN_ESTIMATE_MINUTES);
        assert_eq!(clamp_minutes(1000.0), MAX_ESTIMATE_MINUTES);
        assert_eq!(clamp_minutes(f64::NAN), MIN_ESTIMATE_MINUTES);
    }

    #[test]
    fn description_length_counts_bmp_characters_once() {
        // 101 two-byte characters is over the first threshold
        let r = ChangeRecord::new("r1", "Update", Category::Improvement, noon())
            .with_description("é".repeat(101));
        assert_eq!(explain(&r, None).description_length, 101);
        assert_eq!(estimate(&r, None), 45);
    }

    #[test]
    fn description_length_counts_astral_characters_twice() {
        // 60 emoji are 120 UTF-16 units: base 45 * 0.8
        let r = ChangeRecord::new("r1", "Update", Category::Other, noon())
            .with_description("😀".repeat(60));
        assert_eq!(explain(&r, None).description_length, 120);
        assert_eq!(estimate(&r, None), 36);
    }
}
