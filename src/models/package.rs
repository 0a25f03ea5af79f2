//! Package stats types
//!
//! The backend only knows how many users currently hold each package, not
//! when each of them bought it.

use serde::{Deserialize, Serialize};

/// Aggregate stats for one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStat {
    #[serde(alias = "_id")]
    pub package_id: String,
    pub package_name: String,
    #[serde(default)]
    pub price_in_coins: u64,
    #[serde(default)]
    pub current_active_users: u64,
    /// Revenue from currently active holders, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_revenue: Option<u64>,
    /// Lifetime purchase count
    #[serde(default)]
    pub total_purchases: u64,
}

impl PackageStat {
    /// Create stats with only the fields the reconstruction needs
    pub fn new(
        package_id: impl Into<String>,
        package_name: impl Into<String>,
        price_in_coins: u64,
        current_active_users: u64,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            package_name: package_name.into(),
            price_in_coins,
            current_active_users,
            current_revenue: None,
            total_purchases: 0,
        }
    }

    /// Revenue from current holders, derived from price when not reported
    pub fn current_revenue(&self) -> u64 {
        self.current_revenue
            .unwrap_or(self.price_in_coins.saturating_mul(self.current_active_users))
    }
}

/// Platform-wide revenue figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(default)]
    pub total_revenue: u64,
    #[serde(default)]
    pub current_revenue: u64,
    #[serde(default)]
    pub total_purchases: u64,
}

/// Body of the package stats endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatsResponse {
    #[serde(default)]
    pub package_stats: Vec<PackageStat>,
    #[serde(default)]
    pub overall_stats: OverallStats,
}
