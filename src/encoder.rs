use crate::snapshot::RepoSnapshot;
use chrono::Local;
use serde::Serialize;

pub const DEFAULT_CONST_NAME: &str = "GIT_STATE";
pub const DEFAULT_TYPE_NAME: &str = "GitState";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Format {
    /// a `pub const` Rust item
    #[default]
    Rust,
    /// the snapshot as pretty printed JSON
    Json,
}

/// Renders a [`RepoSnapshot`] as text.
#[derive(Debug, Clone)]
pub struct ArtifactEncoder {
    pub format: Format,
    pub const_name: String,
    pub type_name: String,
}

impl Default for ArtifactEncoder {
    fn default() -> Self {
        ArtifactEncoder {
            format: Format::Rust,
            const_name: DEFAULT_CONST_NAME.to_string(),
            type_name: DEFAULT_TYPE_NAME.to_string(),
        }
    }
}

#[derive(Serialize)]
struct JsonArtifact<'a> {
    #[serde(flatten)]
    snapshot: &'a RepoSnapshot,
    utc_offset: i32,
}

impl ArtifactEncoder {
    /// Render `snapshot` with the machine's current UTC offset.
    pub fn encode(&self, snapshot: &RepoSnapshot) -> String {
        self.encode_with_offset(snapshot, local_utc_offset())
    }

    /// Render `snapshot` with an explicit UTC offset in seconds east of UTC.
    /// Same inputs, same bytes.
    pub fn encode_with_offset(&self, snapshot: &RepoSnapshot, utc_offset: i32) -> String {
        match self.format {
            Format::Rust => self.rust_item(snapshot, utc_offset),
            Format::Json => {
                let artifact = JsonArtifact {
                    snapshot,
                    utc_offset,
                };
                // only strings, numbers and options: serialization cannot fail
                let mut json = serde_json::to_string_pretty(&artifact)
                    .expect("snapshot serialization failed");
                json.push('\n');
                json
            }
        }
    }

    fn rust_item(&self, snapshot: &RepoSnapshot, utc_offset: i32) -> String {
        let digest = snapshot
            .digest
            .as_ref()
            .map(|d| byte_literals(d.as_bytes()))
            .unwrap_or_else(|| byte_literals(&[]));

        format!(
            "pub const {name}: {ty} = {ty} {{\n    \
             time_stamp: {time_stamp},\n    \
             utc_offset: {utc_offset},\n    \
             is_dirty: {is_dirty},\n    \
             count: {count},\n    \
             tag: {tag},\n    \
             branch: {branch},\n    \
             digest: &{digest},\n\
             }};\n",
            name = self.const_name,
            ty = self.type_name,
            time_stamp = float_literal(snapshot.timestamp),
            is_dirty = snapshot.is_dirty,
            count = optional(snapshot.commit_count.map(|n| n.to_string())),
            tag = optional(snapshot.tag.as_deref().map(string_literal)),
            branch = optional(snapshot.branch.as_deref().map(string_literal)),
        )
    }
}

/// Seconds east of UTC of the local zone right now.
pub fn local_utc_offset() -> i32 {
    Local::now().offset().local_minus_utc()
}

/// `[0x00, 0xff, 0x10]` for bytes `00 ff 10`.
pub fn byte_literals(bytes: &[u8]) -> String {
    let elements: Vec<String> = bytes.iter().map(|b| format!("0x{:02x}", b)).collect();
    format!("[{}]", elements.join(", "))
}

/// A Rust string literal for `value`, quotes and escapes included.
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}

fn optional(value: Option<String>) -> String {
    match value {
        Some(v) => format!("Some({})", v),
        None => "None".to_string(),
    }
}

// `{:?}` keeps the decimal point on whole numbers, so the literal stays an f64
fn float_literal(value: f64) -> String {
    if value.is_finite() {
        format!("{:?}", value)
    } else {
        "0.0".to_string()
    }
}
