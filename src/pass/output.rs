//! Delivery of a derived password to stdout, a file or the clipboard.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use copypasta::{ClipboardContext, ClipboardProvider};
use log::{debug, warn};
use zeroize::Zeroize;

/// Where the password ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    File(String),
    Clipboard,
}

/// Write `password` plus a newline to `out`.
pub fn write_line<W: Write>(out: &mut W, password: &str) -> io::Result<()> {
    let mut line = Vec::with_capacity(password.len() + 1);
    line.extend_from_slice(password.as_bytes());
    line.push(b'\n');
    let result = out.write_all(&line).and_then(|_| out.flush());
    line.zeroize();
    result
}

/// Append `password` to the file at `path`, creating parent directories.
pub fn append_to_file(path: &str, password: &str) -> io::Result<String> {
    let p = Path::new(path);
    if let Some(parent) = p.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(p)?;
    write_line(&mut file, password)?;

    Ok(fs::canonicalize(p)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.to_string()))
}

/// Emit to `target` and report where the password actually went. A clipboard
/// that cannot be reached falls back to stdout when `fallback_to_stdout` agrees.
pub fn emit(
    target: &Target,
    password: &str,
    fallback_to_stdout: impl FnOnce() -> bool,
) -> io::Result<Target> {
    match target {
        Target::Stdout => {
            write_line(&mut io::stdout().lock(), password)?;
            Ok(Target::Stdout)
        }
        Target::File(path) => append_to_file(path, password).map(Target::File),
        Target::Clipboard => match to_clipboard(password) {
            Ok(()) => Ok(Target::Clipboard),
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                if fallback_to_stdout() {
                    write_line(&mut io::stdout().lock(), password)?;
                    Ok(Target::Stdout)
                } else {
                    Err(io::Error::other(format!("clipboard unavailable: {e}")))
                }
            }
        },
    }
}

fn to_clipboard(password: &str) -> Result<(), String> {
    let mut ctx = ClipboardContext::new().map_err(|e| e.to_string())?;
    let mut contents = password.to_string();
    let result = ctx.set_contents(contents.clone()).map_err(|e| e.to_string());
    contents.zeroize();
    if result.is_ok()
        && let Ok(mut retrieved) = ctx.get_contents()
    {
        retrieved.zeroize();
    }
    debug!("clipboard set");
    result
}
