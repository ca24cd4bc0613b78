//! Saved derivation defaults.

mod file;

use std::io;
use std::path::{Path, PathBuf};

use crate::error;
use crate::pass::{CharacterMap, charset, mode};

/// Longest password the CLI and the settings file accept.
pub const MAX_LENGTH: usize = 65536;

/// Defaults applied before command-line flags. The key is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: u32,
    pub pass_length: usize,
    pub enabled_chars: String,
    pub disabled_chars: String,
    pub view_map: bool,
    pub to_clipboard: bool,
    pub output_file_path: String,
}

impl Settings {
    pub fn load_from_file() -> io::Result<Self> {
        Self::load_from(&file::default_path())
    }

    pub fn save_to_file(&self) -> io::Result<()> {
        self.save_to(&file::default_path())
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let mut settings = Settings::default();
        file::load(path, &mut settings)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        file::save(path, self)
    }

    /// Character map these defaults would derive over. Fails when they can
    /// never produce a password.
    pub fn character_map(&self) -> error::Result<CharacterMap> {
        charset::build(self.mode, &self.enabled_chars, &self.disabled_chars)
    }

    pub fn path() -> PathBuf {
        file::default_path()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: mode::ALL,
            pass_length: 16,
            enabled_chars: String::new(),
            disabled_chars: String::new(),
            view_map: false,
            to_clipboard: false,
            output_file_path: String::new(),
        }
    }
}
