//! Metrics calculation module
//!
//! Summary figures derived from the trend series:
//! - User growth and new-user counts
//! - Month-over-month revenue growth
//! - Revenue breakdown by package

pub mod growth;
pub mod revenue;

/// Percentage change from `previous` to `current`
///
/// With nothing to compare against, any activity counts as 100% growth and
/// no activity as 0%. Never returns NaN or infinity.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        ((current - previous) / previous) * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// `part` as a percentage of `total`, 0 when the total is zero
pub fn share_percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        (part / total) * 100.0
    } else {
        0.0
    }
}
