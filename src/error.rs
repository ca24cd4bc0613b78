//! Error types for password derivation.

use thiserror::Error;

/// Reasons a derivation can fail. None of these are retriable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("character {0:?} (U+{code:04X}) is outside the accepted range 0x20..=0x7E", code = *.0 as u32)]
    InvalidCharacter(char),

    #[error("character set is empty after applying mode, enabled and disabled characters")]
    EmptyCharset,

    #[error("cannot stretch key to {length} characters")]
    Unstretchable { length: usize },

    #[error("password length must be at least 1")]
    InvalidLength,

    #[error("key must not be empty")]
    EmptyKey,
}

pub type Result<T> = std::result::Result<T, DerivationError>;
