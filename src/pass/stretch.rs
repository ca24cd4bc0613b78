//! Key stretching by repeated MD5.

use log::trace;
use md5::{Digest, Md5};
use zeroize::Zeroizing;

use crate::error::{DerivationError, Result};

/// Bytes produced per block.
pub const BLOCK: usize = 16;
/// Bytes of the parent level hashed into each child block.
const CHUNK: usize = 8;

/// Stretch `key` into `next_power_of_two(length) * 16` bytes.
///
/// Level 0 is `md5(md5(key))`. Each following level doubles the block count,
/// block `i` being `md5` of bytes `i*8..i*8+8` of the previous level. The tree
/// is rebuilt for every call; only lengths rounding up to the same power of two
/// see the same bytes.
pub fn stretch(key: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
    let blocks = length
        .checked_next_power_of_two()
        .ok_or(DerivationError::Unstretchable { length })?;
    let size = blocks
        .checked_mul(BLOCK)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(DerivationError::Unstretchable { length })?;

    let inner: Zeroizing<[u8; BLOCK]> = Zeroizing::new(Md5::digest(key).into());
    let mut level = Zeroizing::new(Md5::digest(inner.as_slice()).to_vec());
    let mut l = 1;

    while l < length {
        l *= 2;
        let mut next = Zeroizing::new(Vec::new());
        next.try_reserve_exact(l * BLOCK)
            .map_err(|_| DerivationError::Unstretchable { length })?;
        for chunk in level.chunks_exact(CHUNK).take(l) {
            next.extend_from_slice(&Md5::digest(chunk));
        }
        level = next;
        trace!("stretch level: {} blocks", l);
    }

    debug_assert_eq!(level.len(), size);
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md5(data: &[u8]) -> Vec<u8> {
        Md5::digest(data).to_vec()
    }

    #[test]
    fn buffer_size_is_power_of_two_blocks() {
        for (length, blocks) in [(1, 1), (2, 2), (3, 4), (5, 8), (16, 16), (17, 32)] {
            assert_eq!(stretch(b"abc", length).unwrap().len(), blocks * BLOCK, "length {length}");
        }
    }

    #[test]
    fn level_zero_is_double_md5() {
        let buf = stretch(b"abc", 1).unwrap();
        assert_eq!(buf.as_slice(), md5(&md5(b"abc")).as_slice());
    }

    #[test]
    fn known_md5_seed() {
        // md5("abc") = 900150983cd24fb0d6963f7d28e17f72
        let inner = md5(b"abc");
        assert_eq!(
            inner,
            [
                0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28, 0xe1,
                0x7f, 0x72
            ]
        );
    }

    #[test]
    fn each_level_hashes_eight_byte_chunks() {
        let seed = md5(&md5(b"key"));
        let mut level2 = md5(&seed[..8]);
        level2.extend(md5(&seed[8..]));

        assert_eq!(stretch(b"key", 2).unwrap().as_slice(), level2.as_slice());

        let mut level4 = Vec::new();
        for i in 0..4 {
            level4.extend(md5(&level2[i * 8..i * 8 + 8]));
        }
        assert_eq!(stretch(b"key", 3).unwrap().as_slice(), level4.as_slice());
        assert_eq!(stretch(b"key", 4).unwrap().as_slice(), level4.as_slice());
    }

    #[test]
    fn deterministic() {
        assert_eq!(stretch(b"secret", 40).unwrap(), stretch(b"secret", 40).unwrap());
        assert_ne!(stretch(b"secret", 40).unwrap(), stretch(b"secreT", 40).unwrap());
    }

    #[test]
    fn rejects_unrepresentable_length() {
        assert_eq!(
            stretch(b"abc", usize::MAX),
            Err(DerivationError::Unstretchable { length: usize::MAX })
        );
    }
}
