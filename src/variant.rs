use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Mul, Rem, RemAssign, Shl, Shr, Sub, SubAssign};

use crate::Width;
use crate::{bound, modulo, vector};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Adler32 {}
    impl Sealed for super::Adler64 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Unsigned integer used for the accumulators and the packed checksum.
pub trait Word:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + Rem<Output = Self>
    + RemAssign
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + From<u8>
    + Into<u64>
{
    const ZERO: Self;
    const ONE: Self;

    /// Converts a byte count the caller knows to fit.
    fn from_len(len: usize) -> Self;
}

impl Word for u32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    fn from_len(len: usize) -> Self {
        debug_assert!(u32::try_from(len).is_ok(), "length {len} does not fit u32");
        len as u32
    }
}

impl Word for u64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline(always)]
    fn from_len(len: usize) -> Self {
        len as u64
    }
}

/// One member of the Adler family: accumulator width, modulus and packing.
///
/// Implemented by [`Adler32`] and [`Adler64`] only.
pub trait Variant:
    sealed::Sealed + Copy + Default + Debug + PartialEq + Eq + Hash + Send + Sync + 'static
{
    type Word: Word;

    const WIDTH: Width;
    /// Largest prime below `2^HALF_BITS`.
    const MODULUS: Self::Word;
    /// Bits per packed half, `W` in `(s2 << W) | s1`.
    const HALF_BITS: u32;
    const LOW_MASK: Self::Word;
    /// Bytes that may be accumulated before `s2` must be reduced.
    const NMAX: usize;
    /// Packed `s1 = 1, s2 = 0`.
    const SEED: Self::Word;

    /// Exact `x mod MODULUS` for every word.
    fn reduce(x: Self::Word) -> Self::Word;

    #[doc(hidden)]
    const NARROW_BLOCK: usize;
    #[doc(hidden)]
    const WIDE_BLOCK: usize;

    #[doc(hidden)]
    fn narrow_blocks(s1: &mut Self::Word, s2: &mut Self::Word, blocks: &[u8]);

    #[doc(hidden)]
    fn wide_blocks(s1: &mut Self::Word, s2: &mut Self::Word, blocks: &[u8]);

    #[inline]
    fn pack(s1: Self::Word, s2: Self::Word) -> Self::Word {
        (s2 << Self::HALF_BITS) | s1
    }

    /// Splits a packed seed into `(s1, s2)`, each reduced below the modulus.
    #[inline]
    fn unpack(seed: Self::Word) -> (Self::Word, Self::Word) {
        let s1 = (seed & Self::LOW_MASK) % Self::MODULUS;
        let s2 = (seed >> Self::HALF_BITS) % Self::MODULUS;
        (s1, s2)
    }

    #[inline(always)]
    fn reduce_pair(s1: &mut Self::Word, s2: &mut Self::Word) {
        *s1 = Self::reduce(*s1);
        *s2 = Self::reduce(*s2);
        debug_assert!(*s1 < Self::MODULUS, "s1 = {} not reduced", *s1);
        debug_assert!(*s2 < Self::MODULUS, "s2 = {} not reduced", *s2);
    }

    /// `len mod MODULUS` as a word.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn reduce_len(len: usize) -> Self::Word {
        let modulus: u64 = Self::MODULUS.into();
        // The remainder is below the modulus, which itself fits 32 bits.
        Self::Word::from_len((len as u64 % modulus) as usize)
    }
}

/// Adler-32: 16-bit halves modulo 65521, accumulated in `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Adler32;

/// Adler-64: 32-bit halves modulo 4294967291, accumulated in `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Adler64;

#[allow(clippy::cast_possible_truncation)]
impl Variant for Adler32 {
    type Word = u32;

    const WIDTH: Width = Width::W32;
    const MODULUS: u32 = 65_521;
    const HALF_BITS: u32 = 16;
    const LOW_MASK: u32 = 0xffff;
    const NMAX: usize = bound::nmax(Self::MODULUS as u64, u32::BITS) as usize;
    const SEED: u32 = 1;

    const NARROW_BLOCK: usize = vector::NARROW32_BLOCK;
    const WIDE_BLOCK: usize = vector::WIDE32_BLOCK;

    #[inline(always)]
    fn reduce(x: u32) -> u32 {
        modulo::mod_65521(x)
    }

    #[inline]
    fn narrow_blocks(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
        vector::narrow32(s1, s2, blocks);
    }

    #[inline]
    fn wide_blocks(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
        vector::wide32(s1, s2, blocks);
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Variant for Adler64 {
    type Word = u64;

    const WIDTH: Width = Width::W64;
    const MODULUS: u64 = 4_294_967_291;
    const HALF_BITS: u32 = 32;
    const LOW_MASK: u64 = 0xffff_ffff;
    const NMAX: usize = bound::nmax(Self::MODULUS, u64::BITS) as usize;
    const SEED: u64 = 1;

    const NARROW_BLOCK: usize = vector::NARROW64_BLOCK;
    const WIDE_BLOCK: usize = vector::WIDE64_BLOCK;

    #[inline(always)]
    fn reduce(x: u64) -> u64 {
        modulo::mod_4294967291(x)
    }

    #[inline]
    fn narrow_blocks(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
        vector::narrow64(s1, s2, blocks);
    }

    #[inline]
    fn wide_blocks(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
        vector::wide64(s1, s2, blocks);
    }
}

const _: () = assert!(Adler32::NMAX == 5552);
const _: () = assert!(Adler64::NMAX == 363_898_415);
