//! User growth metrics
//!
//! New-user counts for the reporting window and how they compare with the
//! window before it.

use chrono::{Duration as ChronoDuration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{percent_change, share_percent};
use crate::models::user::UserRecord;

/// User growth figures for one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserGrowthSummary {
    /// Every fetched user, with or without a usable join date. Can exceed the
    /// cumulative total of the daily series, which only counts dated users.
    pub total_users: u64,
    /// Users who joined within the window
    pub new_users_in_window: u64,
    /// New users as a share of all users
    pub user_growth_pct: f64,
    /// Users who joined in the window before this one
    pub previous_window_new_users: u64,
    /// Change in new users versus the previous window
    pub new_users_change_pct: f64,
}

/// Count users who joined after `now - window_days`
pub fn new_users_in_window(users: &[UserRecord], window_days: u32, now: NaiveDateTime) -> u64 {
    let cutoff = now - ChronoDuration::days(window_days as i64);
    users
        .iter()
        .filter_map(|u| u.joined_at)
        .filter(|joined| *joined > cutoff)
        .count() as u64
}

/// Count users who joined in the window immediately before the current one
pub fn previous_window_new_users(
    users: &[UserRecord],
    window_days: u32,
    now: NaiveDateTime,
) -> u64 {
    let end = now - ChronoDuration::days(window_days as i64);
    let start = end - ChronoDuration::days(window_days as i64);
    users
        .iter()
        .filter_map(|u| u.joined_at)
        .filter(|joined| *joined > start && *joined <= end)
        .count() as u64
}

/// New users as a percentage of all users, 0 when there are none
pub fn user_growth_pct(new_users: u64, total_users: u64) -> f64 {
    share_percent(new_users as f64, total_users as f64)
}

/// Calculate all user growth figures for a window ending at `now`
pub fn calculate_user_growth(
    users: &[UserRecord],
    window_days: u32,
    now: NaiveDateTime,
) -> UserGrowthSummary {
    let total_users = users.len() as u64;
    let new_users = new_users_in_window(users, window_days, now);
    let previous = previous_window_new_users(users, window_days, now);

    UserGrowthSummary {
        total_users,
        new_users_in_window: new_users,
        user_growth_pct: user_growth_pct(new_users, total_users),
        previous_window_new_users: previous,
        new_users_change_pct: percent_change(new_users as f64, previous as f64),
    }
}
