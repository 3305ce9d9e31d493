use crate::error::Result;
use crate::snapshot::{Digest, RepoSnapshot};
use crate::utils::git::GitCommand;
use chrono::Utc;
use log::{debug, warn};
use std::path::Path;

const STATUS: &[&str] = &["status", "--porcelain", "--untracked-files=no"];
const EXACT_TAG: &[&str] = &["describe", "--exact-match", "--tags", "HEAD"];
const BRANCH: &[&str] = &["symbolic-ref", "--short", "-q", "HEAD"];
const HEAD_COMMIT: &[&str] = &["log", "-1", "--no-show-signature", "--format=%H:%ct"];
const COMMIT_COUNT: &[&str] = &["rev-list", "--count", "HEAD"];

/// Timestamp used when HEAD's commit time cannot be read on a clean tree.
pub const UNKNOWN_COMMIT_TIME: f64 = 0.0;

/// Current wall-clock time in (fractional) seconds since the unix epoch.
pub fn wall_clock() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}

/// Builds a [`RepoSnapshot`] from a fixed sequence of read-only git queries.
pub struct RepoStateReader<G> {
    git: G,
    clock: fn() -> f64,
}

impl<G: GitCommand> RepoStateReader<G> {
    pub fn new(git: G) -> Self {
        RepoStateReader {
            git,
            clock: wall_clock,
        }
    }

    /// Replace the clock used to stamp dirty trees.
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    /// Query the working tree at `dir`.
    ///
    /// A dirty tree (or a failing status check) returns right away with only
    /// the capture time filled in. On a clean tree every remaining query runs
    /// independently and a failing one only leaves its own field empty. Errors
    /// are reserved for git failing to launch and for a malformed commit hash.
    pub fn read(&self, dir: &Path) -> Result<RepoSnapshot> {
        if !self.is_clean(dir)? {
            let captured_at = (self.clock)();
            debug!("working tree is dirty, stamped at {}", captured_at);
            return Ok(RepoSnapshot::dirty(captured_at));
        }

        let tag = self.query(dir, EXACT_TAG)?;
        let branch = self.query(dir, BRANCH)?;
        let (digest, timestamp) = match self.query(dir, HEAD_COMMIT)? {
            Some(line) => parse_head_commit(&line)?,
            None => {
                warn!("commit time of HEAD unavailable, using {}", UNKNOWN_COMMIT_TIME);
                (None, UNKNOWN_COMMIT_TIME)
            }
        };
        let commit_count = self
            .query(dir, COMMIT_COUNT)?
            .and_then(|count| parse_count(&count));

        Ok(RepoSnapshot {
            is_dirty: false,
            timestamp,
            commit_count,
            branch,
            tag,
            digest,
        })
    }

    fn is_clean(&self, dir: &Path) -> Result<bool> {
        let out = self.git.run(dir, STATUS)?;
        if !out.success() {
            warn!(
                "git {} exited with {}: {}",
                STATUS.join(" "),
                out.status,
                out.stderr.trim()
            );
            return Ok(false);
        }
        Ok(out.stdout.trim().is_empty())
    }

    /// Run one query. `None` when it exits non-zero or prints nothing.
    fn query(&self, dir: &Path, args: &[&str]) -> Result<Option<String>> {
        let out = self.git.run(dir, args)?;
        if !out.success() {
            debug!("git {} exited with {}", args.join(" "), out.status);
            return Ok(None);
        }
        let value = out.stdout.trim();
        if value.is_empty() {
            debug!("git {} printed nothing", args.join(" "));
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }
}

/// Split `<hash>:<unix time>` into its parts. Only the last line counts,
/// anything before it (e.g. gpg output) is ignored.
fn parse_head_commit(output: &str) -> Result<(Option<Digest>, f64)> {
    let line = output.lines().last().unwrap_or(output).trim();
    let (hash, time) = line.split_once(':').unwrap_or((line, ""));
    let digest = Digest::from_hex(hash.trim())?;
    let timestamp = match time.trim().parse::<i64>() {
        Ok(secs) => secs as f64,
        Err(_) => {
            warn!(
                "unparseable commit time {:?}, using {}",
                time, UNKNOWN_COMMIT_TIME
            );
            UNKNOWN_COMMIT_TIME
        }
    };
    Ok((Some(digest), timestamp))
}

fn parse_count(count: &str) -> Option<u64> {
    match count.parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!("unexpected commit count {:?}, leaving it unset", count);
            None
        }
        Ok(n) => Some(n),
    }
}
