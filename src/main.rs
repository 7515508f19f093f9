use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use atr_lint::changes::{ChangeSummary, GitDiff};
use atr_lint::config::{Args, Config};
use atr_lint::validation::validate_document;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    let config = Config::from_args(args)?;
    info!("checking {}", config.list_path.display());

    let content = fs::read_to_string(&config.list_path)
        .with_context(|| format!("Failed to read ATR list: {}", config.list_path.display()))?;

    let result = validate_document(&content, &config.validation_options());
    print!("{}", result.render());

    if result.has_failures() {
        warn!(
            "{} failed: {:?}",
            config.list_path.display(),
            result.violations()
        );
        return Ok(ExitCode::FAILURE);
    }
    info!("{} records, sorted and unique", result.lists.len());

    if config.skip_count {
        return Ok(ExitCode::SUCCESS);
    }

    let summary = ChangeSummary::collect(&GitDiff::new(&config.repo), config.banner_threshold)?;
    print!("{}", summary);

    Ok(ExitCode::SUCCESS)
}
