//! Monthly sales rollup
//!
//! Groups the daily sales series by calendar month, plus the calendar
//! helpers month-over-month comparisons rely on.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::weekly::aggregate_to_weekly;
use super::{MonthlySales, TimeSeriesPoint};

/// Get the month identifier (YYYY-MM) for a date
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Year and month (1-12) of the month before the given one
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Whether `date` falls in the given calendar month
pub fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Aggregate daily sales into monthly totals, oldest month first
pub fn aggregate_to_monthly(series: &[TimeSeriesPoint]) -> Vec<MonthlySales> {
    let mut monthly_map: BTreeMap<String, MonthlySales> = BTreeMap::new();

    for point in series {
        let key = month_key(point.date);
        let monthly = monthly_map.entry(key.clone()).or_insert_with(|| MonthlySales {
            month: key,
            revenue: 0,
            packages_sold: 0,
            packages: BTreeMap::new(),
            weekly: Vec::new(),
        });

        monthly.revenue = monthly.revenue.saturating_add(point.revenue);
        monthly.packages_sold = monthly.packages_sold.saturating_add(point.packages_sold);
        for (name, count) in &point.packages {
            let sold = monthly.packages.entry(name.clone()).or_insert(0);
            *sold = sold.saturating_add(*count);
        }
    }

    // Weeks belong to the month they start in
    for week in aggregate_to_weekly(series) {
        let key = month_key(week.week_start);
        if let Some(monthly) = monthly_map.get_mut(&key) {
            monthly.weekly.push(week);
        }
    }

    monthly_map.into_values().collect()
}
