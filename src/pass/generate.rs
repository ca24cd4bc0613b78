//! Password derivation.

use log::debug;

use super::charset::{self, CharacterMap};
use super::stretch::{self, BLOCK};
use super::DerivationOptions;
use crate::error::{DerivationError, Result};

/// Weights applied to the 16 slots of a block. The upper eight slots are
/// always zero because only the low half of each block is read.
const FACTORS: [u64; 16] = [
    2, 5, 11, 53, 101, 503, 1009, 5003, 10007, 50021, 100003, 500009, 1000003, 5000011, 10000019,
    50000017,
];

/// Derive the password described by `options`.
///
/// Identical options always give the identical password. Nothing is returned
/// unless every position could be filled.
pub fn derive(options: &DerivationOptions) -> Result<String> {
    if options.key.is_empty() {
        return Err(DerivationError::EmptyKey);
    }
    if options.length == 0 {
        return Err(DerivationError::InvalidLength);
    }

    let map = charset::build(options.mode, &options.enabled_chars, &options.disabled_chars)?;
    let stretched = stretch::stretch(&options.key, options.length)?;
    debug!(
        "deriving {} chars over a {}-char map from {} stretched bytes",
        options.length,
        map.len(),
        stretched.len()
    );

    let bytes: Vec<u8> = (0..options.length)
        .map(|i| map.as_bytes()[index(&stretched, i, &map)])
        .collect();
    // Safety: map is all ASCII
    Ok(unsafe { String::from_utf8_unchecked(bytes) })
}

/// Map position `i` of the stretched buffer to an index into `map`.
#[inline]
fn index(stretched: &[u8], i: usize, map: &CharacterMap) -> usize {
    let mut slots = [0u8; BLOCK];
    slots[..8].copy_from_slice(&stretched[i * BLOCK..i * BLOCK + 8]);
    (weighted_sum(&slots) % map.len() as u64) as usize
}

#[inline]
fn weighted_sum(slots: &[u8; BLOCK]) -> u64 {
    slots
        .iter()
        .zip(FACTORS)
        .map(|(&b, f)| f * b as u64)
        .sum()
}
