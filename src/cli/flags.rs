use clap::Parser;

use crate::settings::MAX_LENGTH;

/// Deterministic password derivation.
///
/// The same key, mode, length and character overrides always produce the
/// same password. Nothing is random and nothing but optional defaults is stored.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "hashpass",
    version,
    about = "Derive a reproducible password from a secret key",
    after_help = "\
MODE BITS:
    1  uppercase letters A-Z
    2  lowercase letters a-z
    4  digits 0-9
    Combine by adding: -m 3 is upper + lower, -m 7 is all three.

CHARACTERS:
    -E and -D accept printable ASCII (0x20-0x7E, space included).
    Disabled characters win over enabled ones.
    Each category is ordered by code point, so specials map as ! # @ [ ...
    regardless of the order given; mode digits stay in the digit category.
    Example: -m 1 -E 3A55e gives 35A-Ze; -m 1 -D Ae3A gives B-Z.

KEY:
    Without -k the key is read from the terminal (not echoed) or from the
    first line of piped stdin. Longer passwords deserve longer keys."
)]
pub struct CliFlags {
    /// Secret key; with --file, the path of a file whose bytes are the key
    #[arg(short, long, value_name = "KEY")]
    pub key: Option<String>,

    /// Treat --key as a file path
    #[arg(short = 'f', long = "file", requires = "key")]
    pub key_file: bool,

    /// Character set bits (0-7), see MODE BITS
    #[arg(short, long, value_name = "BITS", value_parser = clap::value_parser!(u32).range(0..=7))]
    pub mode: Option<u32>,

    /// Password length (1-65536)
    #[arg(short, long, value_name = "N", value_parser = parse_length)]
    pub length: Option<usize>,

    /// Extra characters to include regardless of mode
    #[arg(short = 'E', long = "enable", value_name = "CHARS")]
    pub enable: Option<String>,

    /// Characters to exclude, including ones given with --enable
    #[arg(short = 'D', long = "disable", value_name = "CHARS")]
    pub disable: Option<String>,

    /// Copy the password to the clipboard instead of printing it
    #[arg(short = 'b', long = "board")]
    pub clipboard: bool,

    /// Append the password to a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "clipboard")]
    pub output: Option<String>,

    /// Show the character map and entropy estimate on stderr
    #[arg(long)]
    pub view_map: bool,

    /// Start from the saved defaults instead of the built-in ones
    #[arg(short, long)]
    pub saved: bool,

    /// Save the resolved options as the new defaults: mode, length, character
    /// overrides, --view-map and the output target (-b / -o). Nothing is saved
    /// unless they form a usable character set
    #[arg(long)]
    pub save: bool,

    /// Suppress warnings and confirmations
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log derivation details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_length(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("`{s}` is not a length"))?;
    if (1..=MAX_LENGTH).contains(&n) {
        Ok(n)
    } else {
        Err(format!("length must be between 1 and {MAX_LENGTH}"))
    }
}

impl CliFlags {
    pub fn has_explicit_overrides(&self) -> bool {
        self.mode.is_some()
            || self.length.is_some()
            || self.enable.is_some()
            || self.disable.is_some()
            || self.output.is_some()
            || self.clipboard
            || self.view_map
    }
}
