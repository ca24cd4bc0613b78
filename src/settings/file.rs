//! Settings file persistence.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{MAX_LENGTH, Settings};

const FIELDS: usize = 7;

pub fn save(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let data = format!(
        "{},{},{},{},{},{},{}\n",
        settings.mode,
        settings.pass_length,
        escape(&settings.enabled_chars),
        escape(&settings.disabled_chars),
        settings.view_map,
        settings.to_clipboard,
        escape(&settings.output_file_path),
    );

    file.write_all(data.as_bytes())?;
    debug!("saved settings to {}", path.display());
    Ok(())
}

/// Fill `settings` from `path`. A missing or empty file leaves the defaults.
pub fn load(path: &Path, settings: &mut Settings) -> std::io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let mut reader = BufReader::new(OpenOptions::new().read(true).open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return Ok(());
    }

    let parts = split_escaped(line, ',');
    if parts.len() != FIELDS {
        warn!(
            "ignoring {}: expected {} fields, found {}",
            path.display(),
            FIELDS,
            parts.len()
        );
        return Ok(());
    }

    settings.mode = parts[0].parse().unwrap_or(settings.mode);
    settings.pass_length = parts[1]
        .parse()
        .ok()
        .filter(|n| (1..=MAX_LENGTH).contains(n))
        .unwrap_or(settings.pass_length);
    settings.enabled_chars = parts[2].clone();
    settings.disabled_chars = parts[3].clone();
    settings.view_map = parts[4].parse().unwrap_or(settings.view_map);
    settings.to_clipboard = parts[5].parse().unwrap_or(settings.to_clipboard);
    settings.output_file_path = parts[6].clone();
    Ok(())
}

#[inline]
pub fn default_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config/hashpass/settings")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ',' || c == '|' {
            out.push('|');
        }
        out.push(c);
    }
    out
}

fn split_escaped(s: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
        } else if c == '|' {
            escape_next = true;
        } else if c == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("hashpass-test-{}-{}", std::process::id(), name))
            .join("settings")
    }

    #[test]
    fn split_handles_escapes_and_empty_fields() {
        assert_eq!(split_escaped("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_escaped("|,||,x", ','), vec![",|", "x"]);
        assert_eq!(split_escaped("a,", ','), vec!["a", ""]);
    }

    #[test]
    fn escape_is_inverse_of_split() {
        let raw = "!,|@#,";
        assert_eq!(split_escaped(&escape(raw), ','), vec![raw]);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let saved = Settings {
            mode: 5,
            pass_length: 32,
            enabled_chars: ",|!".into(),
            disabled_chars: "O0".into(),
            view_map: true,
            to_clipboard: false,
            output_file_path: String::new(),
        };
        saved.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), saved);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = temp_path("missing");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_fields_fall_back() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x,0,ab,,maybe,true,out.txt\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        let defaults = Settings::default();
        assert_eq!(loaded.mode, defaults.mode);
        assert_eq!(loaded.pass_length, defaults.pass_length);
        assert_eq!(loaded.enabled_chars, "ab");
        assert!(!loaded.view_map);
        assert!(loaded.to_clipboard);
        assert_eq!(loaded.output_file_path, "out.txt");

        fs::write(&path, "4,999999999,,,false,false,\n").unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().pass_length, defaults.pass_length);

        fs::write(&path, "1,2,3\n").unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), defaults);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
