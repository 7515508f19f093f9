//! Scratch git repositories for the new ATR count tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run git in `dir`, ignoring any identity or signing setup of the machine
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=ATR Tester",
            "-c",
            "user.email=atr@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Repository with `committed` as the list file in its only commit
pub fn repo_with_list(committed: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    fs::write(dir.path().join("smartcard_list.txt"), committed).unwrap();
    git(dir.path(), &["add", "smartcard_list.txt"]);
    git(dir.path(), &["commit", "-q", "-m", "initial list"]);
    dir
}

pub fn write_list(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("smartcard_list.txt"), content).unwrap();
}
