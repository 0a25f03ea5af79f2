//! Calendar-day buckets
//!
//! Produces the dense day skeleton every series is laid on.

use chrono::{Duration as ChronoDuration, NaiveDate};

/// Parse a date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Build `days` consecutive calendar days ending at `anchor`, oldest first
pub fn build_buckets(days: u32, anchor: NaiveDate) -> Vec<NaiveDate> {
    (0..days as i64)
        .rev()
        .map(|n| anchor - ChronoDuration::days(n))
        .collect()
}
