//! Configuration management for the ATR list linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - User-global and project config files
//! - Loading priority: defaults < user-global < project < command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;
use serde::Deserialize;

use crate::changes::DEFAULT_BANNER_THRESHOLD;
use crate::diff::DEFAULT_CONTEXT_LINES;
use crate::validation::ValidationOptions;

/// List file name inside the repository
pub const DEFAULT_LIST_FILE: &str = "smartcard_list.txt";

/// Project config file name inside the repository
pub const PROJECT_CONFIG_FILE: &str = ".atr-lint.toml";

/// Command-line arguments for the ATR list linter
#[derive(Debug, Parser)]
#[command(name = "atr-lint")]
#[command(about = "Check formatting, order and duplicates of the smart card ATR list")]
#[command(version)]
pub struct Args {
    /// ATR list to check
    #[arg(help = "ATR list file (default: smartcard_list.txt in the repository)")]
    pub file: Option<PathBuf>,

    /// Git working tree holding the list
    #[arg(long, default_value = ".", help = "Repository directory")]
    pub repo: PathBuf,

    /// Explicit project config file
    #[arg(long, help = "Config file to use instead of <repo>/.atr-lint.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Unchanged lines shown around each change in diffs")]
    pub context: Option<usize>,

    #[arg(long, help = "New ATR count from which a banner is printed")]
    pub banner_threshold: Option<usize>,

    #[arg(long, help = "Do not count ATRs added since the last commit (staged or not)")]
    pub skip_count: bool,

    /// Log level for the linter
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Settings read from a TOML config file, all optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// List file; a relative path is relative to the repository directory,
    /// in the user-global and the project config alike
    pub file: Option<PathBuf>,
    pub context_lines: Option<usize>,
    pub banner_threshold: Option<usize>,
    pub skip_count: Option<bool>,
}

impl FileConfig {
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        toml::from_str(content)
            .with_context(|| format!("Failed to parse config TOML: {}", source_path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Like `load`, but a missing file is not an error
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Fill unset values from `lower`
    fn or(self, lower: FileConfig) -> FileConfig {
        FileConfig {
            file: self.file.or(lower.file),
            context_lines: self.context_lines.or(lower.context_lines),
            banner_threshold: self.banner_threshold.or(lower.banner_threshold),
            skip_count: self.skip_count.or(lower.skip_count),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// ATR list to check
    pub list_path: PathBuf,
    /// Working tree the new ATRs are counted in
    pub repo: PathBuf,
    pub context_lines: usize,
    pub banner_threshold: usize,
    pub skip_count: bool,
    /// User-global config file, if one was loaded
    pub user_config_path: Option<PathBuf>,
    /// Project config file, if one was loaded
    pub project_config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments and the config files
    pub fn from_args(args: Args) -> Result<Self> {
        let user_config = user_config_path();
        Self::resolve(args, user_config.as_deref())
    }

    /// Create configuration with an explicit user config location (useful for testing)
    pub fn resolve(args: Args, user_config: Option<&Path>) -> Result<Self> {
        let mut user_config_path = None;
        let mut merged = FileConfig::default();

        if let Some(path) = user_config {
            if let Some(user) = FileConfig::load_optional(path)? {
                debug!("loaded user config {}", path.display());
                user_config_path = Some(path.to_path_buf());
                merged = user;
            }
        }

        let project_path = match &args.config {
            Some(explicit) => {
                if !explicit.exists() {
                    bail!("Config file not found: {}", explicit.display());
                }
                explicit.clone()
            }
            None => args.repo.join(PROJECT_CONFIG_FILE),
        };

        let mut project_config_path = None;
        if let Some(project) = FileConfig::load_optional(&project_path)? {
            debug!("loaded project config {}", project_path.display());
            project_config_path = Some(project_path);
            merged = project.or(merged);
        }

        // a list path given on the command line stays relative to the working directory
        let list_path = args
            .file
            .or_else(|| merged.file.map(|file| args.repo.join(file)))
            .unwrap_or_else(|| args.repo.join(DEFAULT_LIST_FILE));

        Ok(Config {
            list_path,
            repo: args.repo,
            context_lines: args
                .context
                .or(merged.context_lines)
                .unwrap_or(DEFAULT_CONTEXT_LINES),
            banner_threshold: args
                .banner_threshold
                .or(merged.banner_threshold)
                .unwrap_or(DEFAULT_BANNER_THRESHOLD),
            skip_count: args.skip_count || merged.skip_count.unwrap_or(false),
            user_config_path,
            project_config_path,
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            context_lines: self.context_lines,
        }
    }
}

/// Default user-global config location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("atr-lint").join("config.toml"))
}
