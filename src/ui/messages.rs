//! User-facing terminal output. Diagnostics go through `log`, not here.

use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Segment boundary in the event list.
pub fn separator(ch: &str, width: usize) {
    println!("{}{}{}", DIM, ch.repeat(width), RESET);
}

/// Redraw the live clock in place (no newline).
pub fn clock_line(display: &str, running: bool) {
    let (color, label) = if running {
        (FG_GREEN, "RUNNING")
    } else {
        (FG_YELLOW, "STOPPED")
    };
    print!("\r{}{}{}{}  {}{}", BOLD, display, RESET, color, label, RESET);
    io::stdout().flush().ok();
}
