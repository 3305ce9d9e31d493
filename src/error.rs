use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{0}` not found in PATH")]
    ExecutableNotFound(String),
    #[error("failed to launch {} {}: {source}", .program.display(), .args.join(" "))]
    Launch {
        program: PathBuf,
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed commit hash {0:?}, expected 40 hex characters")]
    MalformedDigest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
