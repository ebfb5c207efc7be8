//! Plain-text rendering of a pipeline result.
//!
//! Renders exactly what the pipeline returned, in the order returned.

use crate::pipeline::PipelineResult;
use crate::record::Category;
use crate::timeline::format_minutes;

/// Render summary tiles followed by one section per bucket.
pub fn render_report(result: &PipelineResult, show_records: bool) -> String {
    let summary = &result.summary;
    let mut output = String::new();

    output.push_str("\nChangelog Timeline\n");
    output.push_str(&"=".repeat(72));
    output.push_str("\n\n");

    output.push_str(&format!(
        "Total time: {:<10} Records: {}\n",
        format_minutes(summary.total_minutes),
        summary.total_records
    ));
    for category in Category::KNOWN {
        let minutes = summary.minutes_for(category);
        if minutes > 0 {
            output.push_str(&format!(
                "  {:<12} {:>8}\n",
                category.as_str(),
                format_minutes(minutes)
            ));
        }
    }
    let unknown = summary.minutes_for(Category::Unknown);
    if unknown > 0 {
        output.push_str(&format!("  {:<12} {:>8}\n", "unknown", format_minutes(unknown)));
    }

    if result.buckets.is_empty() {
        output.push_str("\nNo changes found.\n");
        return output;
    }

    for bucket in &result.buckets {
        output.push('\n');
        output.push_str(&format!(
            "{} ({}) - {} in {} change{}\n",
            bucket.label,
            bucket.date_range,
            format_minutes(bucket.total_minutes),
            bucket.len(),
            if bucket.len() == 1 { "" } else { "s" }
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if !show_records {
            continue;
        }
        for estimated in &bucket.records {
            let record = &estimated.record;
            output.push_str(&format!(
                "{:<10} {:<12} {:<6} {:>7}  {}\n",
                truncate(&record.id, 10),
                record.category.as_str(),
                record.priority.as_str(),
                format_minutes(estimated.estimated_minutes as u64),
                truncate(&record.title, 40)
            ));
        }
    }

    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
