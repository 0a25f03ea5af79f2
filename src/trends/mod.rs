//! Trend analysis module
//!
//! This module builds the time series behind the reporting charts:
//! - Calendar-day buckets for the selected window
//! - Reconstructed purchase history per package
//! - Daily sales/revenue and user-growth series
//! - Weekly/monthly rollups of the sales series

pub mod buckets;
pub mod daily;
pub mod history;
pub mod monthly;
pub mod weekly;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// Reporting window selectable on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Days7,
        TimeRange::Days30,
        TimeRange::Days90,
        TimeRange::Year,
    ];

    /// Number of calendar days covered by the window
    pub fn days(self) -> u32 {
        match self {
            TimeRange::Days7 => 7,
            TimeRange::Days30 => 30,
            TimeRange::Days90 => 90,
            TimeRange::Year => 365,
        }
    }

    /// Short label used by the range picker
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Days7 => "7d",
            TimeRange::Days30 => "30d",
            TimeRange::Days90 => "90d",
            TimeRange::Year => "1y",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Days30
    }
}

impl FromStr for TimeRange {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" => Ok(TimeRange::Days7),
            "30d" => Ok(TimeRange::Days30),
            "90d" => Ok(TimeRange::Days90),
            "1y" => Ok(TimeRange::Year),
            _ => Err(AnalyticsError::InvalidRange(s.to_string())),
        }
    }
}

/// One calendar day of the sales/revenue series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar day (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
    /// Revenue in coins attributed to this day
    pub revenue: u64,
    /// Number of package activations attributed to this day
    pub packages_sold: u64,
    /// Activations per package name
    pub packages: BTreeMap<String, u64>,
}

impl TimeSeriesPoint {
    /// Create a zero-filled point for a given day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            revenue: 0,
            packages_sold: 0,
            packages: BTreeMap::new(),
        }
    }

    /// Add activations of one package to this day
    pub fn add_sales(&mut self, package_name: &str, count: u64, revenue: u64) {
        self.revenue = self.revenue.saturating_add(revenue);
        self.packages_sold = self.packages_sold.saturating_add(count);
        let sold = self.packages.entry(package_name.to_string()).or_insert(0);
        *sold = sold.saturating_add(count);
    }
}

/// One calendar day of the user-growth series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrowthPoint {
    pub date: NaiveDate,
    /// Users who joined on this day
    pub new_users: u64,
    /// Users who joined on or before this day
    pub total_users: u64,
}

/// Running revenue total, for area charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeRevenuePoint {
    pub date: NaiveDate,
    pub revenue: u64,
    pub cumulative_revenue: u64,
}

/// Sales rolled up by week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySales {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Sunday of the week
    pub week_end: NaiveDate,
    /// ISO week number
    pub week_number: u32,
    pub revenue: u64,
    pub packages_sold: u64,
    pub packages: BTreeMap<String, u64>,
    /// Daily breakdown
    pub daily: Vec<TimeSeriesPoint>,
}

/// Sales rolled up by calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// Month in YYYY-MM format
    pub month: String,
    pub revenue: u64,
    pub packages_sold: u64,
    pub packages: BTreeMap<String, u64>,
    /// Weekly breakdown, keyed to the month the week starts in
    pub weekly: Vec<WeeklySales>,
}

/// Sales series at the requested granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "granularity", content = "points", rename_all = "lowercase")]
pub enum SalesRollup {
    Daily(Vec<TimeSeriesPoint>),
    Weekly(Vec<WeeklySales>),
    Monthly(Vec<MonthlySales>),
}

/// Granularity level for chart queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Daily
    }
}

impl From<&str> for Granularity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weekly" => Granularity::Weekly,
            "monthly" => Granularity::Monthly,
            _ => Granularity::Daily,
        }
    }
}

impl From<Option<String>> for Granularity {
    fn from(s: Option<String>) -> Self {
        match s {
            Some(val) => Granularity::from(val.as_str()),
            None => Granularity::default(),
        }
    }
}
