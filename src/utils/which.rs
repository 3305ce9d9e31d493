use crate::error::{Error, Result};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate `name` on the `PATH` of the current process.
pub fn find_executable(name: &str) -> Result<PathBuf> {
    find_executable_in(name, env::var_os("PATH").as_deref())
}

/// Locate `name` by scanning the directories of `search_path`. First match wins.
///
/// A name containing a path separator is not searched for, only checked.
pub fn find_executable_in(name: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    if name.is_empty() {
        return Err(Error::ExecutableNotFound(name.to_string()));
    }

    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return if is_executable(direct) {
            Ok(direct.to_path_buf())
        } else {
            Err(Error::ExecutableNotFound(name.to_string()))
        };
    }

    search_path
        .into_iter()
        .flat_map(env::split_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| Error::ExecutableNotFound(name.to_string()))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
