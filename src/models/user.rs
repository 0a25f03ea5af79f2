//! User record types
//!
//! Join timestamps arrive as ISO 8601 strings (or null) and are normalized
//! once here into wall-clock time of the reporting timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::trends::buckets::parse_date;

/// User as returned by the users endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "createdAt")]
    pub joined_at: Option<String>,
}

/// Body of the users endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<RawUser>,
}

/// User with a validated join time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    /// `None` when the backend sent no usable timestamp
    pub joined_at: Option<NaiveDateTime>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, joined_at: Option<NaiveDateTime>) -> Self {
        Self {
            id: id.into(),
            joined_at,
        }
    }

    /// Validate a raw user, converting its join time into `tz`
    pub fn from_raw<Tz: TimeZone>(raw: RawUser, tz: &Tz) -> Self {
        let joined_at = match raw.joined_at.as_deref() {
            Some(value) => {
                let parsed = parse_timestamp(value, tz);
                if parsed.is_none() {
                    tracing::debug!(
                        "User {} has unparseable join date {:?}, excluding from growth",
                        raw.id,
                        value
                    );
                }
                parsed
            }
            None => None,
        };

        Self {
            id: raw.id,
            joined_at,
        }
    }

    /// Calendar day the user joined on
    pub fn join_day(&self) -> Option<NaiveDate> {
        self.joined_at.map(|t| t.date())
    }
}

/// Parse a join timestamp into wall-clock time of `tz`
///
/// Handles formats like:
/// - "2026-02-05T10:30:00.000Z" (converted from its offset into `tz`)
/// - "2026-02-05T10:30:00+05:00"
/// - "2026-02-05T10:30:00" (taken as already local)
/// - "2026-02-05" (midnight)
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2026-02-05T10:30:00.000Z", &Utc),
            Some(dt(2026, 2, 5, 10, 30))
        );
        assert_eq!(
            parse_timestamp("2026-02-05T10:30:00Z", &Utc),
            Some(dt(2026, 2, 5, 10, 30))
        );
        assert_eq!(
            parse_timestamp("2026-02-05T10:30:00", &Utc),
            Some(dt(2026, 2, 5, 10, 30))
        );
        assert_eq!(
            parse_timestamp("2026-02-05 10:30:00", &Utc),
            Some(dt(2026, 2, 5, 10, 30))
        );
        assert_eq!(parse_timestamp("2026-02-05", &Utc), Some(dt(2026, 2, 5, 0, 0)));
    }

    #[test]
    fn test_parse_timestamp_converts_offset() {
        // 23:30 UTC is already the next day in UTC+2
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            parse_timestamp("2025-12-31T23:30:00Z", &tz),
            Some(dt(2026, 1, 1, 1, 30))
        );

        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            parse_timestamp("2026-01-01T02:00:00Z", &tz),
            Some(dt(2025, 12, 31, 21, 0))
        );
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp("", &Utc), None);
        assert_eq!(parse_timestamp("yesterday", &Utc), None);
        assert_eq!(parse_timestamp("2026-99-99T00:00:00Z", &Utc), None);
        assert_eq!(parse_timestamp("2026", &Utc), None);
    }

    #[test]
    fn test_from_raw() {
        let raw = RawUser {
            id: "u1".to_string(),
            joined_at: Some("2025-01-05T08:00:00Z".to_string()),
        };
        let user = UserRecord::from_raw(raw, &Utc);
        assert_eq!(user.id, "u1");
        assert_eq!(user.join_day(), NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn test_from_raw_excludes_bad_dates() {
        let missing = UserRecord::from_raw(
            RawUser {
                id: "u1".to_string(),
                joined_at: None,
            },
            &Utc,
        );
        assert_eq!(missing.joined_at, None);

        let garbage = UserRecord::from_raw(
            RawUser {
                id: "u2".to_string(),
                joined_at: Some("not a date".to_string()),
            },
            &Utc,
        );
        assert_eq!(garbage.joined_at, None);
        assert_eq!(garbage.join_day(), None);
    }

    #[test]
    fn test_deserialize_users_response() {
        let json = r#"{"users": [
            {"id": "u1", "joinedAt": "2025-01-05T10:00:00Z"},
            {"_id": "u2", "createdAt": "2025-02-01"},
            {"id": "u3", "joinedAt": null},
            {"id": "u4"}
        ]}"#;

        let response: UsersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.users.len(), 4);
        assert_eq!(response.users[1].id, "u2");
        assert_eq!(response.users[1].joined_at.as_deref(), Some("2025-02-01"));
        assert!(response.users[2].joined_at.is_none());
        assert!(response.users[3].joined_at.is_none());
    }
}
