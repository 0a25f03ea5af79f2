//! Weekly sales rollup
//!
//! Groups the daily sales series into Monday-start weeks.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::{TimeSeriesPoint, WeeklySales};

/// Get the Monday of the week containing the given date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(days_from_monday as i64)
}

/// Get the Sunday of the week containing the given date
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday();
    date + chrono::Duration::days(days_to_sunday as i64)
}

/// Aggregate daily sales into weekly totals, oldest week first
pub fn aggregate_to_weekly(series: &[TimeSeriesPoint]) -> Vec<WeeklySales> {
    let mut weekly_map: BTreeMap<NaiveDate, WeeklySales> = BTreeMap::new();

    for point in series {
        let start = week_start(point.date);
        let weekly = weekly_map.entry(start).or_insert_with(|| WeeklySales {
            week_start: start,
            week_end: week_end(point.date),
            week_number: point.date.iso_week().week(),
            revenue: 0,
            packages_sold: 0,
            packages: BTreeMap::new(),
            daily: Vec::new(),
        });

        weekly.revenue = weekly.revenue.saturating_add(point.revenue);
        weekly.packages_sold = weekly.packages_sold.saturating_add(point.packages_sold);
        for (name, count) in &point.packages {
            let sold = weekly.packages.entry(name.clone()).or_insert(0);
            *sold = sold.saturating_add(*count);
        }
        weekly.daily.push(point.clone());
    }

    weekly_map
        .into_values()
        .map(|mut w| {
            w.daily.sort_by(|a, b| a.date.cmp(&b.date));
            w
        })
        .collect()
}
