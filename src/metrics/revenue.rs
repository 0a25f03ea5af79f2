//! Revenue metrics
//!
//! Month-over-month growth from the reconstructed purchase history and the
//! per-package revenue ranking.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{percent_change, share_percent};
use crate::models::package::PackageStat;
use crate::trends::history::PackageHistory;
use crate::trends::monthly::{in_month, previous_month};

/// Revenue of the current calendar month against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthOverMonth {
    pub this_month_revenue: u64,
    pub last_month_revenue: u64,
    pub growth_pct: f64,
}

/// One package's slice of current revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueShare {
    pub package_id: String,
    pub package_name: String,
    pub current_revenue: u64,
    pub active_users: u64,
    pub share_pct: f64,
}

/// Compare reconstructed revenue of the month containing `today` with the
/// month before it
pub fn month_over_month(histories: &[PackageHistory<'_>], today: NaiveDate) -> MonthOverMonth {
    let (year, month) = (today.year(), today.month());
    let (last_year, last_month) = previous_month(year, month);

    let mut this_month_revenue: u64 = 0;
    let mut last_month_revenue: u64 = 0;
    for entry in histories.iter().flat_map(|h| h.entries.iter()) {
        if in_month(entry.date, year, month) {
            this_month_revenue = this_month_revenue.saturating_add(entry.revenue);
        } else if in_month(entry.date, last_year, last_month) {
            last_month_revenue = last_month_revenue.saturating_add(entry.revenue);
        }
    }

    MonthOverMonth {
        this_month_revenue,
        last_month_revenue,
        growth_pct: percent_change(this_month_revenue as f64, last_month_revenue as f64),
    }
}

/// Rank packages by current revenue, highest first
///
/// Packages with equal revenue keep their input order.
pub fn revenue_breakdown(packages: &[PackageStat]) -> Vec<RevenueShare> {
    let total = packages
        .iter()
        .map(|p| p.current_revenue())
        .fold(0, u64::saturating_add);

    let mut shares: Vec<RevenueShare> = packages
        .iter()
        .map(|p| RevenueShare {
            package_id: p.package_id.clone(),
            package_name: p.package_name.clone(),
            current_revenue: p.current_revenue(),
            active_users: p.current_active_users,
            share_pct: share_percent(p.current_revenue() as f64, total as f64),
        })
        .collect();

    // sort_by is stable
    shares.sort_by(|a, b| b.current_revenue.cmp(&a.current_revenue));
    shares
}
