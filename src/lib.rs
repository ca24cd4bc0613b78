//! # hashpass
//!
//! Deterministic password derivation: a secret key, a character-set mode and a
//! length always yield the same password. No randomness, no stored state.
//!
//! The key is stretched with repeated MD5 into `next_power_of_two(length)`
//! 16-byte blocks; the low half of each block is folded through a fixed weight
//! table into an index of a character map built by interleaving the uppercase,
//! lowercase, digit and special categories.
//!
//! ```
//! use hashpass::pass::{DerivationOptions, derive, mode};
//!
//! let options = DerivationOptions::new(b"abc", mode::DIGITS, 5);
//! let password = derive(&options).unwrap();
//! assert_eq!(password.len(), 5);
//! assert!(password.bytes().all(|b| b.is_ascii_digit()));
//! assert_eq!(password, derive(&options).unwrap());
//! ```

pub mod cli;
pub mod error;
pub mod pass;
pub mod settings;
pub mod terminal;

pub use error::DerivationError;
pub use pass::{CharacterMap, DerivationOptions, derive};
