//! Date helper functions

use chrono::NaiveDate;

/// Format a date for display (like "January 15, 2024")
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Format a date for machine consumption (ISO 8601 calendar date)
pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
