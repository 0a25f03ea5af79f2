//! Club Analytics - Dashboard Reporting Engine
//!
//! This library provides the computation layer behind the membership club's
//! reporting screen. It handles:
//! - Decoding the package stats and user payloads into typed records
//! - Calendar-day buckets for the selected reporting window
//! - Reconstruction of per-day purchase history from aggregate package counts
//! - Sales/revenue and user-growth time series
//! - Month-over-month and window-over-window growth figures
//!
//! Nothing here touches the network, the disk or the system clock: the
//! reference instant is always passed in by the caller.

pub mod metrics;
pub mod models;
pub mod snapshot;
pub mod trends;

pub use models::package::{OverallStats, PackageStat};
pub use models::user::UserRecord;
pub use snapshot::{build_snapshot, AnalyticsInput, AnalyticsSnapshot};
pub use trends::{Granularity, TimeRange, TimeSeriesPoint, UserGrowthPoint};

/// Error type for the input boundary
///
/// The engine itself never fails; only decoding caller-supplied payloads can.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid time range: {0}. Use '7d', '30d', '90d' or '1y'")]
    InvalidRange(String),
}

// Errors cross the JSON boundary as plain strings
impl serde::Serialize for AnalyticsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
