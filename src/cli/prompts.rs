//! Warnings, confirmations and yes/no prompts. All of it goes to stderr so
//! stdout carries nothing but the password.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::terminal::{RED, RESET, YELLOW};

/// Quiet mode: suppresses warnings, confirmations and prompts.
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

pub fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(0) == 1 }
}

/// True when prompting is pointless: quiet mode or no terminal on stdin.
pub fn skip_prompt() -> bool {
    quiet() || !stdin_is_tty()
}

/// Print a warning message to stderr (yellow) - suppressed in quiet mode
pub fn warn(msg: &str) {
    if !quiet() {
        eprintln!("{YELLOW}{msg}{RESET}");
    }
}

/// Print an error message to stderr (red) - never suppressed
pub fn error(msg: &str) {
    eprintln!("{RED}{msg}{RESET}");
}

pub fn clipboard_copied() {
    if !quiet() {
        eprintln!("*** -COPIED TO CLIPBOARD- ***");
    }
}

pub fn password_written(path: &str) {
    if !quiet() {
        eprintln!("password \u{2192} {path}");
    }
}

pub fn settings_saved(path: &str) {
    if !quiet() {
        eprintln!("defaults saved \u{2192} {path}");
    }
}

pub fn key_entry_aborted() {
    eprintln!("Aborted.");
}

/// Ask whether to print to the terminal when the clipboard is unavailable.
/// Quiet or non-interactive runs fall back without asking.
pub fn clipboard_fallback_prompt() -> bool {
    if skip_prompt() {
        return true;
    }

    eprint!("Clipboard unavailable. Print to terminal instead? [Y/n]: ");
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return true;
    }
    let input = input.trim().to_lowercase();
    input.is_empty() || input == "y" || input == "yes"
}
