//! Key acquisition: literal flag, key file, hidden prompt or piped stdin.

use std::fs;
use std::io::{self, BufRead};

use anyhow::{Context as _, Result, bail};
use log::debug;
use zeroize::Zeroizing;

use super::prompts;
use crate::terminal::read_hidden;

/// Where the key bytes come from.
#[derive(Debug, PartialEq, Eq)]
pub enum KeySource<'a> {
    Literal(&'a str),
    File(&'a str),
    Prompt,
    Stdin,
}

impl<'a> KeySource<'a> {
    pub fn select(key: Option<&'a str>, from_file: bool, interactive: bool) -> Self {
        match key {
            Some(path) if from_file => KeySource::File(path),
            Some(key) => KeySource::Literal(key),
            None if interactive => KeySource::Prompt,
            None => KeySource::Stdin,
        }
    }
}

/// Read the key. `Ok(None)` means the user aborted the prompt.
pub fn acquire(source: &KeySource<'_>) -> Result<Option<Zeroizing<Vec<u8>>>> {
    let key = match source {
        KeySource::Literal(key) => Zeroizing::new(key.as_bytes().to_vec()),
        KeySource::File(path) => {
            Zeroizing::new(fs::read(path).with_context(|| format!("failed to read key file {path}"))?)
        }
        KeySource::Prompt => match read_hidden("Key").context("failed to read key from terminal")? {
            Some(line) => Zeroizing::new(line.as_bytes().to_vec()),
            None => {
                prompts::key_entry_aborted();
                return Ok(None);
            }
        },
        KeySource::Stdin => read_first_line(&mut io::stdin().lock())?,
    };

    if key.is_empty() {
        bail!("key is empty");
    }
    debug!("key: {} bytes", key.len());
    Ok(Some(key))
}

/// First line of `input` without its line terminator.
pub fn read_first_line<R: BufRead>(input: &mut R) -> Result<Zeroizing<Vec<u8>>> {
    let mut line = Zeroizing::new(Vec::new());
    input
        .read_until(b'\n', &mut line)
        .context("failed to read key from stdin")?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(line)
}
