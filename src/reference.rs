//! Byte-at-a-time definition of the checksum, one modulo per accumulation.
//!
//! Slow on purpose: every other engine is tested against this one.

use crate::variant::Variant;

/// Computes the checksum of `data` starting from the packed `seed`.
#[must_use]
pub fn checksum<V: Variant>(seed: V::Word, data: &[u8]) -> V::Word {
    let (mut s1, mut s2) = V::unpack(seed);
    for &byte in data {
        s1 = (s1 + V::Word::from(byte)) % V::MODULUS;
        s2 = (s2 + s1) % V::MODULUS;
    }
    V::pack(s1, s2)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Adler32, Adler64};

    #[test]
    fn test_wikipedia() {
        assert_eq!(checksum::<Adler32>(Adler32::SEED, b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn test_empty_returns_seed() {
        assert_eq!(checksum::<Adler32>(Adler32::SEED, &[]), 1);
        assert_eq!(checksum::<Adler64>(0xdead_beef_0000_0001, &[]), 0xdead_beef_0000_0001);
    }

    #[test]
    fn test_small_vectors() {
        assert_eq!(checksum::<Adler32>(1, b"a"), 0x0062_0062);
        assert_eq!(checksum::<Adler64>(1, b"a"), 0x0000_0062_0000_0062);
        let s1 = 1 + 97 + 98 + 99;
        let s2 = 98 + 196 + 295;
        assert_eq!(checksum::<Adler32>(1, b"abc"), (s2 << 16) | s1);
    }

    #[test]
    fn test_matches_simd_adler32() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i * 31 % 251) as u8).collect();
        let mut oracle = simd_adler32::Adler32::new();
        oracle.write(&data);
        assert_eq!(checksum::<Adler32>(Adler32::SEED, &data), oracle.finish());
    }
}
