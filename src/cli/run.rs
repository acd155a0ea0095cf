//! Run command implementation.
//!
//! Loads the config, applies CLI overrides and performs one pass.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::cli::{Cli, RunArgs};
use crate::config::CacheBustConfig;
use crate::log;
use crate::pipeline::{BustReport, bust};
use crate::utils::plural_count;

pub fn run(cli: &Cli, args: &RunArgs) -> Result<()> {
    let config = CacheBustConfig::load(cli, args)?;
    let report = bust(&config.job()).context("cache busting failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        log_summary(&report);
    }

    Ok(())
}

fn log_summary(report: &BustReport) {
    log!(
        "bust";
        "{} hashed, meta hash {}",
        plural_count(report.run.len(), "file"),
        report.meta_hash.bold()
    );
    if !report.rewritten.is_empty() {
        let total: usize = report.rewritten.iter().map(|r| r.replacements).sum();
        log!(
            "bust";
            "{} rewritten ({})",
            plural_count(report.rewritten.len(), "template"),
            plural_count(total, "replacement")
        );
    }
}
