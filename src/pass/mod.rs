//! Password derivation and output.

pub mod charset;
mod generate;
pub mod output;
pub mod stretch;

use std::fmt;

use zeroize::Zeroizing;

pub use charset::CharacterMap;
pub use generate::derive;

/// Mode bits selecting the built-in categories. Other bits are ignored.
pub mod mode {
    pub const UPPER: u32 = 0b0001;
    pub const LOWER: u32 = 0b0010;
    pub const DIGITS: u32 = 0b0100;
    pub const ALL: u32 = 0b0111;
}

/// Everything a derivation depends on. The key is an owned copy, wiped on drop.
#[derive(Clone)]
pub struct DerivationOptions {
    pub key: Zeroizing<Vec<u8>>,
    pub mode: u32,
    pub length: usize,
    pub enabled_chars: String,
    pub disabled_chars: String,
}

impl DerivationOptions {
    pub fn new(key: &[u8], mode: u32, length: usize) -> Self {
        Self {
            key: Zeroizing::new(key.to_vec()),
            mode,
            length,
            enabled_chars: String::new(),
            disabled_chars: String::new(),
        }
    }

    /// Force extra characters into the map regardless of mode.
    pub fn enable(mut self, chars: &str) -> Self {
        self.enabled_chars = chars.to_string();
        self
    }

    /// Remove characters from whatever mode and `enable` produced.
    pub fn disable(mut self, chars: &str) -> Self {
        self.disabled_chars = chars.to_string();
        self
    }

    /// Character map these options derive over.
    pub fn character_map(&self) -> crate::error::Result<CharacterMap> {
        charset::build(self.mode, &self.enabled_chars, &self.disabled_chars)
    }
}

impl fmt::Debug for DerivationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationOptions")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("mode", &self.mode)
            .field("length", &self.length)
            .field("enabled_chars", &self.enabled_chars)
            .field("disabled_chars", &self.disabled_chars)
            .finish()
    }
}
