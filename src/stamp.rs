//! The record type generated artifacts construct.
//!
//! ```
//! use gitstamp::GitState;
//!
//! pub const GIT_STATE: GitState = GitState {
//!     time_stamp: 1700000000.0,
//!     utc_offset: 3600,
//!     is_dirty: false,
//!     count: Some(12),
//!     tag: Some("v0.3.0"),
//!     branch: Some("main"),
//!     digest: &[0xab; 20],
//! };
//!
//! assert_eq!(GIT_STATE.describe(), "v0.3.0");
//! ```

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GitState {
    /// Commit time of HEAD, or the time the stamp was taken if `is_dirty`.
    pub time_stamp: f64,
    /// Seconds east of UTC on the machine that took the stamp.
    pub utc_offset: i32,
    pub is_dirty: bool,
    pub count: Option<u64>,
    pub tag: Option<&'static str>,
    pub branch: Option<&'static str>,
    /// 20 bytes, or empty when the commit is unknown.
    pub digest: &'static [u8],
}

impl GitState {
    pub fn time(&self) -> SystemTime {
        let secs = self.time_stamp;
        let offset = Duration::try_from_secs_f64(secs.abs()).unwrap_or_default();
        if secs >= 0.0 {
            UNIX_EPOCH + offset
        } else {
            UNIX_EPOCH - offset
        }
    }

    /// The stamp time in the zone it was taken in.
    pub fn local_time(&self) -> Option<DateTime<FixedOffset>> {
        let zone = FixedOffset::east_opt(self.utc_offset)?;
        let secs = self.time_stamp.floor();
        let nanos = (((self.time_stamp - secs) * 1e9) as u32).min(999_999_999);
        let utc = Utc.timestamp_opt(secs as i64, nanos).single()?;
        Some(utc.with_timezone(&zone))
    }

    pub fn commit_hash(&self) -> Option<String> {
        if self.digest.is_empty() {
            None
        } else {
            Some(hex::encode(self.digest))
        }
    }

    /// The tag if HEAD has one, else the short hash; `-dirty` appended when dirty.
    pub fn describe(&self) -> String {
        let base = match (self.tag, self.commit_hash()) {
            (Some(tag), _) => tag.to_string(),
            (None, Some(hash)) => hash.get(..7).unwrap_or(&hash).to_string(),
            (None, None) => "unknown".to_string(),
        };
        if self.is_dirty {
            format!("{}-dirty", base)
        } else {
            base
        }
    }
}
