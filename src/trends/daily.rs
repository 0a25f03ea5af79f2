//! Daily trend calculations
//!
//! Lays reconstructed purchases and user join dates onto the day buckets.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::history::PackageHistory;
use super::{CumulativeRevenuePoint, TimeSeriesPoint, UserGrowthPoint};
use crate::models::user::UserRecord;

/// Merge per-package histories into one dense sales series
///
/// Every bucket gets a point, zero-filled when nothing was sold. Entries
/// dated outside the buckets are dropped.
pub fn build_sales_series(
    buckets: &[NaiveDate],
    histories: &[PackageHistory<'_>],
) -> Vec<TimeSeriesPoint> {
    let mut series: Vec<TimeSeriesPoint> =
        buckets.iter().map(|d| TimeSeriesPoint::new(*d)).collect();
    let index: HashMap<NaiveDate, usize> =
        buckets.iter().enumerate().map(|(i, d)| (*d, i)).collect();

    for history in histories {
        let name = &history.package.package_name;
        for entry in &history.entries {
            match index.get(&entry.date) {
                Some(&i) => series[i].add_sales(name, entry.count, entry.revenue),
                None => tracing::trace!(
                    "Dropping {} purchases of {} on {}: outside window",
                    entry.count,
                    name,
                    entry.date
                ),
            }
        }
    }

    series
}

/// New and cumulative users for every bucket
///
/// Users without a join date are never counted.
pub fn build_user_growth_series(
    buckets: &[NaiveDate],
    users: &[UserRecord],
) -> Vec<UserGrowthPoint> {
    let join_days: Vec<NaiveDate> = users.iter().filter_map(|u| u.join_day()).collect();

    buckets
        .iter()
        .map(|&date| UserGrowthPoint {
            date,
            new_users: join_days.iter().filter(|d| **d == date).count() as u64,
            total_users: join_days.iter().filter(|d| **d <= date).count() as u64,
        })
        .collect()
}

/// Running revenue total over a sales series
pub fn cumulative_revenue(series: &[TimeSeriesPoint]) -> Vec<CumulativeRevenuePoint> {
    let mut cumulative: u64 = 0;
    series
        .iter()
        .map(|p| {
            cumulative = cumulative.saturating_add(p.revenue);
            CumulativeRevenuePoint {
                date: p.date,
                revenue: p.revenue,
                cumulative_revenue: cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::PackageStat;
    use crate::trends::buckets::build_buckets;
    use crate::trends::history::{reconstruct_all, PurchaseHistoryEntry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(id: &str, day: Option<NaiveDate>) -> UserRecord {
        UserRecord::new(id, day.map(|d| d.and_hms_opt(12, 0, 0).unwrap()))
    }

    #[test]
    fn test_sales_series_is_dense() {
        let buckets = build_buckets(30, date(2026, 2, 5));
        let series = build_sales_series(&buckets, &[]);

        assert_eq!(series.len(), 30);
        assert!(series
            .iter()
            .all(|p| p.revenue == 0 && p.packages_sold == 0 && p.packages.is_empty()));
        assert_eq!(series[29].date, date(2026, 2, 5));
    }

    #[test]
    fn test_sales_series_merges_packages() {
        let today = date(2026, 2, 5);
        let packages = vec![
            PackageStat::new("p1", "Gold", 100, 25),
            PackageStat::new("p2", "Silver", 40, 2),
        ];
        let histories = reconstruct_all(&packages, 30, today);
        let series = build_sales_series(&build_buckets(30, today), &histories);

        // Both packages sell on the anchor day
        let last = &series[29];
        assert_eq!(last.packages["Gold"], 3);
        assert_eq!(last.packages["Silver"], 1);
        assert_eq!(last.packages_sold, 4);
        assert_eq!(last.revenue, 340);

        let revenue: u64 = series.iter().map(|p| p.revenue).sum();
        assert_eq!(revenue, 2500 + 80);
        let sold: u64 = series.iter().map(|p| p.packages_sold).sum();
        assert_eq!(sold, 27);
    }

    #[test]
    fn test_sales_series_drops_out_of_window_entries() {
        let package = PackageStat::new("p1", "Gold", 100, 3);
        let history = PackageHistory {
            package: &package,
            entries: vec![
                PurchaseHistoryEntry { date: date(2026, 2, 5), count: 1, revenue: 100 },
                PurchaseHistoryEntry { date: date(2026, 1, 1), count: 2, revenue: 200 },
            ],
        };
        let series = build_sales_series(&build_buckets(7, date(2026, 2, 5)), &[history]);

        let revenue: u64 = series.iter().map(|p| p.revenue).sum();
        assert_eq!(revenue, 100);
        assert_eq!(series.iter().map(|p| p.packages_sold).sum::<u64>(), 1);
    }

    #[test]
    fn test_user_growth_scenario() {
        let users = vec![
            user("u1", Some(date(2025, 1, 5))),
            user("u2", Some(date(2025, 1, 5))),
            user("u3", Some(date(2025, 2, 1))),
        ];
        let buckets = build_buckets(90, date(2025, 2, 15));
        let growth = build_user_growth_series(&buckets, &users);

        assert_eq!(growth.len(), 90);

        let jan5 = growth.iter().find(|p| p.date == date(2025, 1, 5)).unwrap();
        assert_eq!((jan5.new_users, jan5.total_users), (2, 2));

        let jan4 = growth.iter().find(|p| p.date == date(2025, 1, 4)).unwrap();
        assert_eq!((jan4.new_users, jan4.total_users), (0, 0));

        let feb1 = growth.iter().find(|p| p.date == date(2025, 2, 1)).unwrap();
        assert_eq!((feb1.new_users, feb1.total_users), (1, 3));

        assert_eq!(growth.last().unwrap().total_users, 3);
    }

    #[test]
    fn test_user_growth_counts_users_before_window() {
        let users = vec![
            user("old", Some(date(2020, 6, 1))),
            user("new", Some(date(2026, 2, 4))),
        ];
        let growth = build_user_growth_series(&build_buckets(7, date(2026, 2, 5)), &users);

        assert_eq!(growth[0].total_users, 1);
        assert_eq!(growth[0].new_users, 0);
        assert_eq!(growth[5].new_users, 1);
        assert_eq!(growth[6].total_users, 2);
    }

    #[test]
    fn test_user_growth_skips_missing_dates() {
        let users = vec![user("u1", None), user("u2", Some(date(2026, 2, 5)))];
        let growth = build_user_growth_series(&build_buckets(7, date(2026, 2, 5)), &users);
        assert_eq!(growth.last().unwrap().total_users, 1);
    }

    #[test]
    fn test_cumulative_revenue_saturates() {
        let mut a = TimeSeriesPoint::new(date(2026, 2, 1));
        a.add_sales("Gold", 1, u64::MAX - 5);
        let mut b = TimeSeriesPoint::new(date(2026, 2, 2));
        b.add_sales("Gold", 1, 10);

        let cumulative = cumulative_revenue(&[a, b]);
        assert_eq!(cumulative[1].cumulative_revenue, u64::MAX);
    }

    #[test]
    fn test_cumulative_revenue() {
        let mut a = TimeSeriesPoint::new(date(2026, 2, 1));
        a.add_sales("Gold", 1, 100);
        let b = TimeSeriesPoint::new(date(2026, 2, 2));
        let mut c = TimeSeriesPoint::new(date(2026, 2, 3));
        c.add_sales("Gold", 2, 200);

        let cumulative = cumulative_revenue(&[a, b, c]);
        let totals: Vec<u64> = cumulative.iter().map(|p| p.cumulative_revenue).collect();
        assert_eq!(totals, vec![100, 100, 300]);
        assert_eq!(cumulative[1].revenue, 0);
    }
}
