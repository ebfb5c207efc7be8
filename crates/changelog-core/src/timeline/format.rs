//! Presentation helper for minute totals.

/// Render minutes as `"45m"`, `"2h"` or `"2h 15m"`.
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {mins}m")
    }
}
