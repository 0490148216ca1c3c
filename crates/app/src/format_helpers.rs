//! Display formatting for dates and enum columns.

use chrono::{DateTime, NaiveDate, Utc};

/// "Jan 20, 2026".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Jan 20, 2026 9:35 PM" in UTC.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Human label for a stored enum tag: `in_transit` becomes
/// "In transit". Used for values the typed enums do not recognize.
pub fn humanize_tag(tag: &str) -> String {
    let spaced = tag.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
