use crate::error::{Error, Result};
use crate::utils::which;
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit status and captured output of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl QueryOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs git with a working directory and an argument list, blocking until it exits.
///
/// A non-zero exit is reported through `QueryOutput::status`; `Err` means the
/// process could not be started at all.
pub trait GitCommand {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<QueryOutput>;
}

/// The git executable found on the search path.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    /// Locate `name` on `PATH`. Fails before any query runs if it is missing.
    pub fn locate(name: &str) -> Result<Self> {
        let program = which::find_executable(name)?;
        debug!("using git at {}", program.display());
        Ok(SystemGit { program })
    }

    pub fn new(program: PathBuf) -> Self {
        SystemGit { program }
    }
}

impl GitCommand for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<QueryOutput> {
        let output = Command::new(&self.program)
            .current_dir(dir)
            .args(args)
            .output()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                args: args.iter().map(|s| s.to_string()).collect(),
                source,
            })?;

        // killed by a signal: no code, treat as failure
        let status = output.status.code().unwrap_or(-1);
        debug!("git {} -> {}", args.join(" "), status);

        Ok(QueryOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

//test cases
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-git");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_run_captures_output_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::new(script(dir.path(), "echo \"$@\"; echo oops >&2; exit 3"));

        let out = git.run(dir.path(), &["rev-list", "--count", "HEAD"]).unwrap();
        assert_eq!(out.status, 3);
        assert!(!out.success());
        assert_eq!(out.stdout, "rev-list --count HEAD\n");
        assert_eq!(out.stderr, "oops\n");
    }

    #[test]
    fn test_run_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        let git = SystemGit::new(script(dir.path(), "pwd"));

        let out = git.run(work.path(), &[]).unwrap();
        assert!(out.success());
        let reported = fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, fs::canonicalize(work.path()).unwrap());
    }

    #[test]
    fn test_launch_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::new(dir.path().join("does-not-exist"));

        let err = git.run(dir.path(), &["status"]).unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
    }
}
