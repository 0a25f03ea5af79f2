//! Purchase history reconstruction
//!
//! The backend keeps only a current active-user count per package. To chart
//! sales over time we spread that count over a handful of synthetic purchase
//! days. The allocation below is fixed: exported reports depend on the exact
//! numbers it produces.

use chrono::{Duration as ChronoDuration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::package::PackageStat;

/// Maximum number of synthetic purchase days per package
pub const MAX_PURCHASE_DAYS: u64 = 10;

/// Synthetic purchase activity for one package on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseHistoryEntry {
    pub date: NaiveDate,
    pub count: u64,
    /// `count * price_in_coins`
    pub revenue: u64,
}

/// A package together with its reconstructed history
#[derive(Debug, Clone)]
pub struct PackageHistory<'a> {
    pub package: &'a PackageStat,
    pub entries: Vec<PurchaseHistoryEntry>,
}

/// Estimate per-day purchases for a package from its active-user count
///
/// This is a display estimate, not ground truth. Counts always sum to
/// `current_active_users`; only their placement in time is invented.
/// Entries run from `today` backwards as the index grows.
pub fn reconstruct_history(
    stat: &PackageStat,
    window_days: u32,
    today: NaiveDate,
) -> Vec<PurchaseHistoryEntry> {
    let total = stat.current_active_users;
    if total == 0 {
        return Vec::new();
    }

    let days_with_purchases = total.min(MAX_PURCHASE_DAYS);
    let users_per_day = total.div_ceil(days_with_purchases);
    let spacing = window_days as f64 / days_with_purchases as f64;

    let mut entries = Vec::with_capacity(days_with_purchases as usize);
    for i in 0..days_with_purchases {
        let days_ago = (spacing * i as f64).floor() as i64;
        let remaining = total.saturating_sub(i.saturating_mul(users_per_day));
        let users_this_day = users_per_day.min(remaining);

        if users_this_day > 0 {
            entries.push(PurchaseHistoryEntry {
                date: today - ChronoDuration::days(days_ago),
                count: users_this_day,
                revenue: users_this_day.saturating_mul(stat.price_in_coins),
            });
        }
    }

    tracing::debug!(
        "Reconstructed {} purchase days for package {} ({} active users)",
        entries.len(),
        stat.package_name,
        total
    );

    entries
}

/// Reconstruct every package's history against the same window
pub fn reconstruct_all(
    packages: &[PackageStat],
    window_days: u32,
    today: NaiveDate,
) -> Vec<PackageHistory<'_>> {
    packages
        .iter()
        .map(|package| PackageHistory {
            package,
            entries: reconstruct_history(package, window_days, today),
        })
        .collect()
}
