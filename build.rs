// build.rs
use std::process::Command;

fn main() {
    // best effort: a source tarball or a machine without git still builds
    let describe = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GITSTAMP_BUILD_DESCRIBE={}", describe);
    println!("cargo:rerun-if-changed=build.rs");
}
