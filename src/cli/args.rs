//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Content-hash cache busting for static assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cachebust.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Hash files, rename or copy them, and rewrite templates
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print content hashes without touching any file
    #[command(visible_alias = "d")]
    Digest {
        #[command(flatten)]
        args: DigestArgs,
    },
}

/// Run command arguments. Anything given here overrides the config file.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Source patterns, hashed as one extra group after the configured ones
    #[arg(value_name = "SRC")]
    pub src: Vec<String>,

    /// Base directory of the SRC patterns (relative to project root)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub cwd: Option<PathBuf>,

    /// SRC patterns already include the --cwd prefix
    #[arg(short, long)]
    pub expand: bool,

    /// Move files instead of copying them
    #[arg(short = 'D', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub delete_originals: Option<bool>,

    /// Text between basename and hash
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Hash length in hex chars (8 to 32)
    #[arg(short = 'l', long)]
    pub hash_length: Option<usize>,

    /// Template to rewrite (repeatable, globs allowed)
    #[arg(short = 'r', long, value_hint = clap::ValueHint::FilePath)]
    pub replace_src: Vec<String>,

    /// Output for the rewritten templates (repeatable, or one directory ending with `/`)
    #[arg(short = 'o', long, value_hint = clap::ValueHint::AnyPath)]
    pub replace_dest: Vec<PathBuf>,

    /// Token replaced by the meta hash
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Compute digests in parallel
    #[arg(short = 'j', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Digest command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct DigestArgs {
    /// Files to digest, in meta hash order
    #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Hash length in hex chars (8 to 32)
    #[arg(short = 'l', long, default_value_t = crate::utils::hash::MIN_LEN)]
    pub hash_length: usize,

    /// Print the digests as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
