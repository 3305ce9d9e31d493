use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

lazy_static! {
    static ref COMMIT_HASH: Regex = Regex::new(r"^[0-9a-fA-F]{40}$").unwrap();
}

/// Binary form of a commit hash. Always exactly 20 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; 20]);

impl Digest {
    /// Parse the 40-character hex form printed by `git log --format=%H`.
    ///
    /// Anything else (odd length, short hash, sha256 repositories) is rejected
    /// rather than truncated.
    pub fn from_hex(hash: &str) -> Result<Self> {
        if !COMMIT_HASH.is_match(hash) {
            return Err(Error::MalformedDigest(hash.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hash, &mut bytes)
            .map_err(|_| Error::MalformedDigest(hash.to_string()))?;
        Ok(Digest(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// State of a working tree captured once per run.
///
/// When `is_dirty` is set, `timestamp` is the capture time and every optional
/// field is `None`. Otherwise `timestamp` is the commit time of HEAD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoSnapshot {
    pub is_dirty: bool,
    /// Seconds since the unix epoch.
    pub timestamp: f64,
    pub commit_count: Option<u64>,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub digest: Option<Digest>,
}

impl RepoSnapshot {
    pub fn dirty(captured_at: f64) -> Self {
        RepoSnapshot {
            is_dirty: true,
            timestamp: captured_at,
            commit_count: None,
            branch: None,
            tag: None,
            digest: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_from_hex() {
        let digest = Digest::from_hex(&"ab".repeat(20)).unwrap();
        assert_eq!(digest.as_bytes(), &[0xab; 20]);
        assert_eq!(digest.to_hex(), "ab".repeat(20));
    }

    #[test]
    fn test_digest_uppercase_is_normalized() {
        let digest = Digest::from_hex(&"AB".repeat(20)).unwrap();
        assert_eq!(digest.to_string(), "ab".repeat(20));
    }

    #[test]
    fn test_digest_rejects_bad_length() {
        let bad = vec![
            String::new(),
            "abc".to_string(),
            "ab".repeat(19),
            "a".repeat(41),
            "ab".repeat(32),
        ];
        for hash in &bad {
            assert!(
                matches!(Digest::from_hex(hash), Err(Error::MalformedDigest(_))),
                "{hash:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_digest_rejects_non_hex() {
        let hash = format!("{}zz", "ab".repeat(19));
        assert!(matches!(
            Digest::from_hex(&hash),
            Err(Error::MalformedDigest(_))
        ));
    }

    #[test]
    fn test_dirty_snapshot_has_no_metadata() {
        let snapshot = RepoSnapshot::dirty(12.5);
        assert!(snapshot.is_dirty);
        assert_eq!(snapshot.timestamp, 12.5);
        assert!(snapshot.commit_count.is_none());
        assert!(snapshot.branch.is_none());
        assert!(snapshot.tag.is_none());
        assert!(snapshot.digest.is_none());
    }

    #[test]
    fn test_json_uses_null_and_hex() {
        let snapshot = RepoSnapshot {
            is_dirty: false,
            timestamp: 1.0,
            commit_count: Some(3),
            branch: None,
            tag: Some("v1".to_string()),
            digest: Some(Digest::from_hex(&"01".repeat(20)).unwrap()),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["branch"].is_null());
        assert_eq!(json["tag"], "v1");
        assert_eq!(json["commit_count"], 3);
        assert_eq!(json["digest"], "01".repeat(20));
    }
}
