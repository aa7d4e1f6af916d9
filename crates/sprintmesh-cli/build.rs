//! Stamps the binary version with the git revision it was built from.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `+git.<count>.<sha>[.dirty]`, or empty outside a git checkout.
fn build_stamp() -> String {
    let Some(sha) = git(&["rev-parse", "--short=10", "HEAD"]).filter(|sha| !sha.is_empty())
    else {
        return String::new();
    };
    let count = git(&["rev-list", "--count", "HEAD"]).unwrap_or_else(|| "0".to_string());
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|changes| !changes.is_empty());
    format!("+git.{count}.{sha}{}", if dirty { ".dirty" } else { "" })
}

fn main() {
    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        println!("cargo:rerun-if-changed={git_dir}/HEAD");
        println!("cargo:rerun-if-changed={git_dir}/index");
    }
    println!("cargo:rustc-env=SPRINTMESH_BUILD_STAMP={}", build_stamp());
}
