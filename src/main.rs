//! cache-bust-meta - content-hash cache busting for static assets.

use anyhow::Result;
use cache_bust_meta::cli::{Cli, Commands, digest::run_digest, run::run};
use cache_bust_meta::logger;
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);
    logger::set_quiet(cli.quiet);

    match &cli.command {
        Commands::Run { args } => run(&cli, args),
        Commands::Digest { args } => run_digest(args),
    }
}
