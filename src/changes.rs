//! New ATR counting
//!
//! Counts the ATRs added to the list in the git working tree, so a
//! maintainer sees how many submissions a pending commit carries.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use log::debug;
use regex::Regex;

/// Below this count the summary is a single line
pub const DEFAULT_BANNER_THRESHOLD: usize = 10;

/// Added diff line holding an ATR: every ATR starts with byte 3B or 3F
static NEW_ATR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+3[BF]").expect("valid regex")
});

/// Source of a line-level diff of the working tree
pub trait DiffSource {
    fn working_tree_diff(&self) -> Result<String>;
}

/// `git diff HEAD`: the working tree, staged changes included, against the
/// last commit
///
/// Color and external diff drivers are disabled so the user's git config
/// cannot change the output format.
#[derive(Debug, Clone)]
pub struct GitDiff {
    repo: PathBuf,
}

impl GitDiff {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

impl DiffSource for GitDiff {
    fn working_tree_diff(&self) -> Result<String> {
        debug!("running git diff HEAD in {}", self.repo.display());

        let output = Command::new("git")
            .args(["diff", "--no-color", "--no-ext-diff", "HEAD"])
            .current_dir(&self.repo)
            .output()
            .with_context(|| format!("Failed to run git diff in {}", self.repo.display()))?;

        if !output.status.success() {
            bail!(
                "git diff failed in {} ({}): {}",
                self.repo.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Whether a diff line adds an ATR
pub fn is_new_atr_line(line: &str) -> bool {
    NEW_ATR_LINE.is_match(line)
}

/// Count the added ATR lines in a diff
pub fn count_new_atrs(diff: &str) -> usize {
    diff.lines().filter(|line| is_new_atr_line(line)).count()
}

/// Number of new ATRs, rendered for the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSummary {
    pub count: usize,
    pub banner_threshold: usize,
}

impl ChangeSummary {
    /// Diff the working tree and count its new ATRs
    pub fn collect(source: &dyn DiffSource, banner_threshold: usize) -> Result<Self> {
        let diff = source.working_tree_diff()?;
        let count = count_new_atrs(&diff);
        debug!("{} new ATR lines in {} bytes of diff", count, diff.len());
        Ok(Self {
            count,
            banner_threshold,
        })
    }

    pub fn is_banner(&self) -> bool {
        self.count >= self.banner_threshold
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_banner() {
            writeln!(f)?;
            writeln!(f, "********************")?;
            writeln!(f, "    {} new ATRs", self.count)?;
            writeln!(f, "********************")?;
            writeln!(f)
        } else if self.count == 1 {
            writeln!(f, "1 new ATR")
        } else {
            writeln!(f, "{} new ATRs", self.count)
        }
    }
}
