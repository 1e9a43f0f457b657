use std::process::Command;

use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");

    let version = env!("CARGO_PKG_VERSION");
    let release_tag = format!("stepback@v{version}");

    let version_string = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) if !head_is_tagged(&release_tag) => {
            format!("{version}+{hash}.{}", Utc::now().format("%Y%m%d"))
        }
        _ => version.to_owned(),
    };

    println!("cargo:rustc-env=STEPBACK_VERSION={version_string}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8(output.stdout).ok()?.trim().to_owned())
}

fn head_is_tagged(tag: &str) -> bool {
    git(&["tag", "--points-at", "HEAD"])
        .is_some_and(|tags| tags.lines().any(|line| line.trim() == tag))
}
