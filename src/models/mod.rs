//! Data models module
//!
//! Typed records decoded from the backend payloads:
//! - Package stats and overall revenue figures
//! - User records with normalized join timestamps

pub mod package;
pub mod user;
