//! Character map building for password derivation.

use std::collections::BTreeSet;

use log::debug;

use super::mode;
use crate::error::{DerivationError, Result};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Character class of a code point. Anything outside 0x20..=0x7E is unacceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Upper,
    Lower,
    Digit,
    Special,
    Unacceptable,
}

impl Category {
    pub fn of(c: char) -> Self {
        match c {
            'A'..='Z' => Category::Upper,
            'a'..='z' => Category::Lower,
            '0'..='9' => Category::Digit,
            ' '..='~' => Category::Special,
            _ => Category::Unacceptable,
        }
    }
}

/// Ordered, duplicate-free output alphabet. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterMap(Vec<u8>);

impl CharacterMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).map(|&b| b as char)
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.0.contains(&(c as u8))
    }

    pub fn as_str(&self) -> &str {
        // Safety: only printable ASCII is ever inserted
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Default)]
struct Categories {
    upper: BTreeSet<char>,
    lower: BTreeSet<char>,
    digit: BTreeSet<char>,
    special: BTreeSet<char>,
}

impl Categories {
    fn set_for(&mut self, c: char) -> Result<&mut BTreeSet<char>> {
        match Category::of(c) {
            Category::Upper => Ok(&mut self.upper),
            Category::Lower => Ok(&mut self.lower),
            Category::Digit => Ok(&mut self.digit),
            Category::Special => Ok(&mut self.special),
            Category::Unacceptable => Err(DerivationError::InvalidCharacter(c)),
        }
    }

    /// Round-robin Upper -> Lower -> Digit -> Special until all are drained.
    fn interleave(&self) -> Vec<u8> {
        let mut iters = [
            self.upper.iter(),
            self.lower.iter(),
            self.digit.iter(),
            self.special.iter(),
        ];
        let total = self.upper.len() + self.lower.len() + self.digit.len() + self.special.len();
        let mut out = Vec::with_capacity(total);

        while out.len() < total {
            for it in iters.iter_mut() {
                if let Some(&c) = it.next() {
                    out.push(c as u8);
                }
            }
        }
        out
    }
}

/// Build the character map from a mode bitmask and the two override strings.
///
/// Disabled characters win over enabled ones. An unacceptable character in
/// either string fails the whole build.
pub fn build(mode: u32, enabled: &str, disabled: &str) -> Result<CharacterMap> {
    let mut sets = Categories::default();

    if mode & mode::UPPER != 0 {
        sets.upper.extend(UPPERCASE.chars());
    }
    if mode & mode::LOWER != 0 {
        sets.lower.extend(LOWERCASE.chars());
    }
    if mode & mode::DIGITS != 0 {
        sets.digit.extend(DIGITS);
    }

    for c in enabled.chars() {
        sets.set_for(c)?.insert(c);
    }
    for c in disabled.chars() {
        sets.set_for(c)?.remove(&c);
    }

    let map = sets.interleave();
    if map.is_empty() {
        return Err(DerivationError::EmptyCharset);
    }

    debug!(
        "character map: {} chars (upper {}, lower {}, digit {}, special {})",
        map.len(),
        sets.upper.len(),
        sets.lower.len(),
        sets.digit.len(),
        sets.special.len()
    );
    Ok(CharacterMap(map))
}
