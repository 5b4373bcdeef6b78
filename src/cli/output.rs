//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (disabled by `NO_COLOR` or a non-terminal stream):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, field names, hints
//! - Bold: headers, important values
//! - Dim: secondary info

use console::style;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 56;

/// Honor `NO_COLOR` on both streams. Call once at startup.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ credentials written`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ key file not found`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    println!("{} {}", style("⚠").yellow(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: credvault profile list`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").cyan().for_stderr(),
        style(msg).cyan().for_stderr()
    );
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  email  bot@example.com`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", style(label).dim(), style(value).bold());
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", style("─".repeat(RULE_WIDTH)).dim());
}

/// Format a path in cyan.
pub fn path(p: &Path) -> String {
    style(p.display()).cyan().to_string()
}

/// Format a command in green.
pub fn cmd(c: &str) -> String {
    style(c).green().to_string()
}

/// Format a field or profile name in cyan.
pub fn key(k: &str) -> String {
    style(k).cyan().to_string()
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}

/// Print raw data for scripts: no decoration, no color.
pub fn data(msg: &str) {
    println!("{}", msg);
}

/// Write raw bytes to stdout and flush.
pub fn bytes(buf: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(buf)?;
    stdout.flush()
}

/// Print an empty line.
pub fn blank() {
    println!();
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    blank();
    header(title);
    rule();
}

/// Check mark or cross for a pass/fail line.
pub fn mark(ok: bool) -> String {
    if ok {
        style("✓").green().to_string()
    } else {
        style("✗").red().to_string()
    }
}
