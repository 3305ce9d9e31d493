use anyhow::{Context, Result};
use clap::Parser;
use gitstamp::encoder::{ArtifactEncoder, Format, DEFAULT_CONST_NAME, DEFAULT_TYPE_NAME};
use gitstamp::reader::RepoStateReader;
use gitstamp::utils::git::SystemGit;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GITSTAMP_BUILD_DESCRIBE"),
    ")"
);

/// Generate a Rust constant describing the state of a git working tree
#[derive(Parser)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// working tree to describe
    #[arg(default_value = ".")]
    repo: PathBuf,

    /// write the artifact here instead of stdout
    #[arg(long, short, env = "GITSTAMP_OUTPUT")]
    output: Option<PathBuf>,

    /// git executable, looked up on PATH
    #[arg(long, default_value = "git", env = "GITSTAMP_GIT")]
    git: String,

    /// name of the generated constant
    #[arg(long, default_value = DEFAULT_CONST_NAME)]
    const_name: String,

    /// record type the constant is built from
    #[arg(long, default_value = DEFAULT_TYPE_NAME)]
    type_name: String,

    #[arg(long, value_enum, default_value_t = Format::Rust)]
    format: Format,
}

/// Write `contents` unless `path` already holds exactly that, so build
/// systems watching the file do not rebuild for nothing.
fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == contents {
            return Ok(false);
        }
    }
    fs::write(path, contents).with_context(|| format!("can not write {}", path.display()))?;
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let git = SystemGit::locate(&cli.git)?;
    let repo = fs::canonicalize(&cli.repo)
        .with_context(|| format!("can not resolve {}", cli.repo.display()))?;
    debug!("reading {}", repo.display());

    let snapshot = RepoStateReader::new(git).read(&repo)?;
    let encoder = ArtifactEncoder {
        format: cli.format,
        const_name: cli.const_name,
        type_name: cli.type_name,
    };
    let artifact = encoder.encode(&snapshot);

    match cli.output {
        Some(path) => {
            if write_if_changed(&path, &artifact)? {
                info!("wrote {}", path.display());
            } else {
                info!("{} is up to date", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(artifact.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
