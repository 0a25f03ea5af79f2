//! Analytics snapshot assembly
//!
//! One call turns a fetched set of packages and users into everything the
//! reporting screen draws. Each call is a full recomputation; nothing is
//! cached between calls.

use chrono::{NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::metrics::growth::calculate_user_growth;
use crate::metrics::revenue::{month_over_month, revenue_breakdown, RevenueShare};
use crate::models::package::{OverallStats, PackageStat, PackageStatsResponse};
use crate::models::user::{UserRecord, UsersResponse};
use crate::trends::buckets::build_buckets;
use crate::trends::daily::{build_sales_series, build_user_growth_series, cumulative_revenue};
use crate::trends::history::reconstruct_all;
use crate::trends::monthly::aggregate_to_monthly;
use crate::trends::weekly::aggregate_to_weekly;
use crate::trends::{
    CumulativeRevenuePoint, Granularity, SalesRollup, TimeRange, TimeSeriesPoint, UserGrowthPoint,
};
use crate::AnalyticsError;

/// Validated input for one analytics refresh
#[derive(Debug, Clone, Default)]
pub struct AnalyticsInput {
    pub packages: Vec<PackageStat>,
    pub overall: OverallStats,
    pub users: Vec<UserRecord>,
}

impl AnalyticsInput {
    /// Validate decoded payloads, normalizing join times into `tz`
    pub fn from_responses<Tz: TimeZone>(
        packages: PackageStatsResponse,
        users: UsersResponse,
        tz: &Tz,
    ) -> Self {
        Self {
            packages: packages.package_stats,
            overall: packages.overall_stats,
            users: users
                .users
                .into_iter()
                .map(|raw| UserRecord::from_raw(raw, tz))
                .collect(),
        }
    }

    /// Decode and validate the raw JSON bodies of both endpoints
    pub fn from_json<Tz: TimeZone>(
        packages_json: &str,
        users_json: &str,
        tz: &Tz,
    ) -> Result<Self, AnalyticsError> {
        let packages: PackageStatsResponse = serde_json::from_str(packages_json)?;
        let users: UsersResponse = serde_json::from_str(users_json)?;
        Ok(Self::from_responses(packages, users, tz))
    }
}

/// Everything the reporting screen needs for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub range: TimeRange,
    /// Reference instant the snapshot was computed for
    pub generated_at: NaiveDateTime,
    pub total_revenue: u64,
    pub current_revenue: u64,
    pub total_purchases: u64,
    pub this_month_revenue: u64,
    pub last_month_revenue: u64,
    pub revenue_growth_pct: f64,
    /// Every fetched user, including those without a usable join date, so it
    /// can exceed the last cumulative total in `user_growth`
    pub total_users: u64,
    pub new_users_in_window: u64,
    pub user_growth_pct: f64,
    pub previous_window_new_users: u64,
    pub new_users_change_pct: f64,
    /// One point per day of the window, oldest first
    pub sales_trend: Vec<TimeSeriesPoint>,
    /// One point per day of the window, oldest first
    pub user_growth: Vec<UserGrowthPoint>,
    pub revenue_breakdown: Vec<RevenueShare>,
}

impl AnalyticsSnapshot {
    /// Sales trend at the requested granularity
    pub fn sales_rollup(&self, granularity: Granularity) -> SalesRollup {
        match granularity {
            Granularity::Daily => SalesRollup::Daily(self.sales_trend.clone()),
            Granularity::Weekly => SalesRollup::Weekly(aggregate_to_weekly(&self.sales_trend)),
            Granularity::Monthly => SalesRollup::Monthly(aggregate_to_monthly(&self.sales_trend)),
        }
    }

    /// Running revenue over the window
    pub fn cumulative_revenue(&self) -> Vec<CumulativeRevenuePoint> {
        cumulative_revenue(&self.sales_trend)
    }
}

/// Compute the snapshot for `range` ending at `now`
///
/// Sales figures come from reconstructed purchase history and are estimates.
pub fn build_snapshot(
    input: &AnalyticsInput,
    range: TimeRange,
    now: NaiveDateTime,
) -> AnalyticsSnapshot {
    let days = range.days();
    let today = now.date();

    tracing::info!(
        "Building {} analytics snapshot for {} packages and {} users",
        range.label(),
        input.packages.len(),
        input.users.len()
    );

    let buckets = build_buckets(days, today);
    let histories = reconstruct_all(&input.packages, days, today);

    let sales_trend = build_sales_series(&buckets, &histories);
    let user_growth = build_user_growth_series(&buckets, &input.users);
    let mom = month_over_month(&histories, today);
    let users = calculate_user_growth(&input.users, days, now);

    AnalyticsSnapshot {
        range,
        generated_at: now,
        total_revenue: input.overall.total_revenue,
        current_revenue: input.overall.current_revenue,
        total_purchases: input.overall.total_purchases,
        this_month_revenue: mom.this_month_revenue,
        last_month_revenue: mom.last_month_revenue,
        revenue_growth_pct: mom.growth_pct,
        total_users: users.total_users,
        new_users_in_window: users.new_users_in_window,
        user_growth_pct: users.user_growth_pct,
        previous_window_new_users: users.previous_window_new_users,
        new_users_change_pct: users.new_users_change_pct,
        sales_trend,
        user_growth,
        revenue_breakdown: revenue_breakdown(&input.packages),
    }
}

/// Current wall-clock time in the local timezone
///
/// For callers only; the computations above always take `now` explicitly.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
