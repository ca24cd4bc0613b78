//! CLI context - bundles settings, flags and the derivation run.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use log::{debug, info};
use zeroize::Zeroize;

use super::key::{self, KeySource};
use super::{CliFlags, prompts};
use crate::pass::output::{self, Target};
use crate::pass::{self, DerivationOptions};
use crate::settings::Settings;
use crate::terminal::{box_bottom, box_line, box_top, calculate_entropy, entropy_strength};

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Aborted,
}

/// Application context for CLI mode.
pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
    settings_path: PathBuf,
}

impl Context {
    /// Start from the saved defaults with `--saved`, the built-in ones otherwise,
    /// then layer the flags on top.
    pub fn new(flags: CliFlags) -> Self {
        Self::with_settings_path(flags, Settings::path())
    }

    /// Like `new`, reading and writing defaults at `settings_path`.
    pub fn with_settings_path(flags: CliFlags, settings_path: PathBuf) -> Self {
        let settings = if flags.saved {
            Settings::load_from(&settings_path).unwrap_or_else(|e| {
                prompts::warn(&format!("Failed to load settings: {}", e));
                Settings::default()
            })
        } else {
            Settings::default()
        };

        let mut ctx = Self {
            settings,
            flags,
            settings_path,
        };
        ctx.apply_flags();
        ctx
    }

    /// Apply CLI flags to settings.
    fn apply_flags(&mut self) {
        if let Some(mode) = self.flags.mode {
            self.settings.mode = mode;
        }
        if let Some(len) = self.flags.length {
            self.settings.pass_length = len;
        }
        if let Some(ref chars) = self.flags.enable {
            self.settings.enabled_chars = chars.clone();
        }
        if let Some(ref chars) = self.flags.disable {
            self.settings.disabled_chars = chars.clone();
        }
        if self.flags.view_map {
            self.settings.view_map = true;
        }
        if self.flags.clipboard {
            self.settings.to_clipboard = true;
            self.settings.output_file_path.clear();
        }
        if let Some(ref path) = self.flags.output {
            self.settings.output_file_path = path.clone();
            self.settings.to_clipboard = false;
        }
    }

    pub fn target(&self) -> Target {
        if self.settings.to_clipboard {
            Target::Clipboard
        } else if !self.settings.output_file_path.is_empty() {
            Target::File(self.settings.output_file_path.clone())
        } else {
            Target::Stdout
        }
    }

    /// Run the CLI: optionally save defaults, read the key, derive, emit.
    pub fn run(&mut self) -> Result<Outcome> {
        prompts::set_quiet(self.flags.quiet);
        self.handle_save()?;

        let source = KeySource::select(
            self.flags.key.as_deref(),
            self.flags.key_file,
            prompts::stdin_is_tty(),
        );
        let Some(key) = key::acquire(&source)? else {
            return Ok(Outcome::Aborted);
        };

        let options = DerivationOptions {
            key,
            mode: self.settings.mode,
            length: self.settings.pass_length,
            enabled_chars: self.settings.enabled_chars.clone(),
            disabled_chars: self.settings.disabled_chars.clone(),
        };

        if self.settings.view_map {
            view_map(&options)?;
        }

        let mut password = pass::derive(&options)?;
        let emitted = output::emit(&self.target(), &password, prompts::clipboard_fallback_prompt);
        password.zeroize();

        match emitted.context("failed to output password")? {
            Target::Clipboard => prompts::clipboard_copied(),
            Target::File(path) => prompts::password_written(&path),
            Target::Stdout => {}
        }
        info!("derived {} characters", options.length);
        Ok(Outcome::Done)
    }

    fn handle_save(&self) -> Result<()> {
        if !self.flags.save {
            return Ok(());
        }
        self.settings
            .character_map()
            .context("defaults not saved")?;
        if !self.flags.has_explicit_overrides() {
            prompts::warn("No options given; saving the current defaults unchanged.");
        }

        let path = &self.settings_path;
        self.settings
            .save_to(path)
            .with_context(|| format!("failed to save settings to {}", path.display()))?;
        prompts::settings_saved(&path.display().to_string());
        Ok(())
    }
}

/// Show the character map and the output-space entropy.
fn view_map(options: &DerivationOptions) -> Result<()> {
    let map = options.character_map()?;
    let bits = calculate_entropy(options.length, map.len());
    debug!("map: {}", map.as_str());

    box_top("Character Map");
    box_line(map.as_str());
    box_line("");
    box_line(&format!(
        "{} chars \u{2022} {:.1} bits ({})",
        map.len(),
        bits,
        entropy_strength(bits)
    ));
    box_bottom();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn flags(args: &[&str]) -> CliFlags {
        CliFlags::try_parse_from(std::iter::once("hashpass").chain(args.iter().copied())).unwrap()
    }

    fn context(args: &[&str]) -> Context {
        Context::new(flags(args))
    }

    fn temp_settings(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hashpass-ctx-{}-{}", std::process::id(), name))
            .join("settings")
    }

    #[test]
    fn flags_override_defaults() {
        let ctx = context(&["-m", "4", "-l", "5", "-E", "#", "-D", "0"]);
        assert_eq!(ctx.settings.mode, 4);
        assert_eq!(ctx.settings.pass_length, 5);
        assert_eq!(ctx.settings.enabled_chars, "#");
        assert_eq!(ctx.settings.disabled_chars, "0");
        assert_eq!(ctx.target(), Target::Stdout);
    }

    #[test]
    fn built_in_defaults_without_flags() {
        let ctx = context(&[]);
        assert_eq!(ctx.settings, Settings::default());
    }

    #[test]
    fn output_targets() {
        assert_eq!(context(&["-b"]).target(), Target::Clipboard);
        assert_eq!(
            context(&["-o", "out.txt"]).target(),
            Target::File("out.txt".into())
        );
    }

    #[test]
    fn literal_key_derives_to_file() {
        let path = std::env::temp_dir().join(format!("hashpass-ctx-{}.txt", std::process::id()));
        let path_str = path.to_str().unwrap();
        let mut ctx = context(&["-k", "abc", "-m", "4", "-l", "5", "-q", "-o", path_str]);

        assert_eq!(ctx.run().unwrap(), Outcome::Done);
        let written = std::fs::read_to_string(&path).unwrap();
        let expected = pass::derive(&DerivationOptions::new(b"abc", 4, 5)).unwrap();
        assert_eq!(written, format!("{expected}\n"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unusable_defaults_are_not_saved() {
        let path = temp_settings("reject");
        let previous = Settings {
            mode: 4,
            pass_length: 5,
            ..Settings::default()
        };
        previous.save_to(&path).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut ctx = Context::with_settings_path(
            flags(&["-k", "abc", "-m", "0", "-q", "--save"]),
            path.clone(),
        );
        let err = ctx.run().unwrap_err();
        assert!(err.chain().any(|e| e.to_string().contains("empty")), "{err:#}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

        let reloaded = Context::with_settings_path(flags(&["-s"]), path.clone());
        assert_eq!(reloaded.settings, previous);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_characters_are_not_saved() {
        let path = temp_settings("invalid");
        let mut ctx = Context::with_settings_path(
            flags(&["-k", "abc", "-E", "\u{e9}", "-q", "--save"]),
            path.clone(),
        );
        let err = ctx.run().unwrap_err();
        assert!(err.chain().any(|e| e.to_string().contains("U+00E9")), "{err:#}");
        assert!(!path.exists());
    }

    #[test]
    fn usable_defaults_are_saved_and_reused() {
        let path = temp_settings("accept");
        let out = path.with_file_name("pass.txt");
        let out_str = out.to_str().unwrap();

        let mut ctx = Context::with_settings_path(
            flags(&["-k", "abc", "-m", "4", "-l", "5", "-q", "-o", out_str, "--save"]),
            path.clone(),
        );
        assert_eq!(ctx.run().unwrap(), Outcome::Done);

        let reused = Context::with_settings_path(flags(&["-s"]), path.clone());
        assert_eq!(reused.settings.mode, 4);
        assert_eq!(reused.settings.pass_length, 5);
        assert_eq!(reused.target(), Target::File(out_str.to_string()));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
