//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for messages only shown with `--verbose`
//!
//! Everything is written to stderr, so a JSON report on stdout stays clean.
//!
//! # Example
//!
//! ```ignore
//! log!("hash"; "{} → {}", from, to);
//! log!("warning"; "source file \"{}\" not found", path.display());
//! debug!("scan"; "{} candidates under {}", n, root.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Global quiet flag (suppresses per-file notices)
static QUIET: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Silence everything except warnings and errors
pub fn set_quiet(q: bool) {
    QUIET.store(q, Ordering::SeqCst);
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    if QUIET.load(Ordering::SeqCst) && !is_problem(&module_lower) {
        return;
    }

    let prefix = colorize_prefix(module, &module_lower);
    let mut stderr = stderr().lock();

    if stderr.is_terminal() {
        execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

#[inline]
fn is_problem(module_lower: &str) -> bool {
    matches!(module_lower, "warning" | "error")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "hash" => prefix.bright_green().bold().to_string(),
        "replace" => prefix.bright_cyan().bold().to_string(),
        "digest" => prefix.bright_blue().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
