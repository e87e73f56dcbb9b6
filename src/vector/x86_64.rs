//! SSE2 and AVX2 lanes.
//!
//! SSE2 is part of the x86-64 baseline and backs the narrow engines. AVX2 is
//! detected at runtime and only reached through the `#[target_feature]` entry
//! points at the bottom of this file.

use std::arch::x86_64::{
    __m128i, __m256i, _mm_add_epi32, _mm_add_epi64, _mm_cvtsi128_si32, _mm_cvtsi128_si64,
    _mm_loadu_si128, _mm_madd_epi16, _mm_sad_epu8, _mm_setr_epi16, _mm_setzero_si128,
    _mm_shuffle_epi32, _mm_slli_epi32, _mm_slli_epi64, _mm_unpackhi_epi8, _mm_unpackhi_epi32,
    _mm_unpackhi_epi64, _mm_unpacklo_epi8, _mm_unpacklo_epi32, _mm256_add_epi32,
    _mm256_add_epi64, _mm256_castsi256_si128, _mm256_extracti128_si256, _mm256_loadu_si256,
    _mm256_madd_epi16, _mm256_maddubs_epi16, _mm256_sad_epu8, _mm256_set1_epi16,
    _mm256_setr_epi8, _mm256_setzero_si256, _mm256_slli_epi32, _mm256_slli_epi64,
    _mm256_unpackhi_epi32, _mm256_unpacklo_epi32,
};

use super::{Lanes, NARROW32_BLOCK, NARROW64_BLOCK, WIDE32_BLOCK, WIDE64_BLOCK, accumulate};
use crate::bound;
use crate::variant::{Adler32, Adler64};

// Shift counts below are log2 of the block sizes.
const _: () = assert!(1 << 5 == NARROW32_BLOCK);
const _: () = assert!(1 << 4 == NARROW64_BLOCK);
const _: () = assert!(1 << 6 == WIDE32_BLOCK);
const _: () = assert!(1 << 5 == WIDE64_BLOCK);

// `maddubs` adds two byte*weight products into a signed 16-bit lane.
const _: () = assert!(bound::pair_product_max(WIDE32_BLOCK) <= i16::MAX as u64);

#[inline(always)]
#[allow(clippy::cast_sign_loss)]
unsafe fn hsum_epi32(v: __m128i) -> u32 {
    unsafe {
        let v = _mm_add_epi32(v, _mm_unpackhi_epi64(v, v));
        let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0b01>(v));
        _mm_cvtsi128_si32(v) as u32
    }
}

#[inline(always)]
#[allow(clippy::cast_sign_loss)]
unsafe fn hsum_epi64(v: __m128i) -> u64 {
    unsafe {
        let hi = _mm_unpackhi_epi64(v, v);
        (_mm_cvtsi128_si64(v) as u64) + (_mm_cvtsi128_si64(hi) as u64)
    }
}

#[derive(Clone, Copy)]
pub(super) struct Sse2Narrow32(__m128i);

impl Lanes for Sse2Narrow32 {
    type Word = u32;
    type Block = (__m128i, __m128i);

    const BLOCK: usize = NARROW32_BLOCK;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(unsafe { _mm_setzero_si128() })
    }

    #[inline(always)]
    unsafe fn load(block: &[u8]) -> Self::Block {
        debug_assert!(block.len() >= Self::BLOCK);
        let ptr = block.as_ptr().cast::<__m128i>();
        // SAFETY: `block` has 32 readable bytes; loads are unaligned.
        unsafe { (_mm_loadu_si128(ptr), _mm_loadu_si128(ptr.add(1))) }
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(unsafe { _mm_add_epi32(self.0, other.0) })
    }

    #[inline(always)]
    unsafe fn add_sum(self, (first, second): Self::Block) -> Self {
        unsafe {
            let zero = _mm_setzero_si128();
            let sums = _mm_add_epi32(_mm_sad_epu8(first, zero), _mm_sad_epu8(second, zero));
            Self(_mm_add_epi32(self.0, sums))
        }
    }

    #[inline(always)]
    unsafe fn add_weighted(self, (first, second): Self::Block) -> Self {
        unsafe {
            let zero = _mm_setzero_si128();
            let p0 = _mm_madd_epi16(
                _mm_unpacklo_epi8(first, zero),
                _mm_setr_epi16(32, 31, 30, 29, 28, 27, 26, 25),
            );
            let p1 = _mm_madd_epi16(
                _mm_unpackhi_epi8(first, zero),
                _mm_setr_epi16(24, 23, 22, 21, 20, 19, 18, 17),
            );
            let p2 = _mm_madd_epi16(
                _mm_unpacklo_epi8(second, zero),
                _mm_setr_epi16(16, 15, 14, 13, 12, 11, 10, 9),
            );
            let p3 = _mm_madd_epi16(
                _mm_unpackhi_epi8(second, zero),
                _mm_setr_epi16(8, 7, 6, 5, 4, 3, 2, 1),
            );
            let products = _mm_add_epi32(_mm_add_epi32(p0, p1), _mm_add_epi32(p2, p3));
            Self(_mm_add_epi32(self.0, products))
        }
    }

    #[inline(always)]
    unsafe fn shift_block(self) -> Self {
        Self(unsafe { _mm_slli_epi32::<5>(self.0) })
    }

    #[inline(always)]
    unsafe fn fold(self) -> u32 {
        unsafe { hsum_epi32(self.0) }
    }
}

#[derive(Clone, Copy)]
pub(super) struct Sse2Narrow64(__m128i);

impl Lanes for Sse2Narrow64 {
    type Word = u64;
    type Block = __m128i;

    const BLOCK: usize = NARROW64_BLOCK;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(unsafe { _mm_setzero_si128() })
    }

    #[inline(always)]
    unsafe fn load(block: &[u8]) -> __m128i {
        debug_assert!(block.len() >= Self::BLOCK);
        // SAFETY: `block` has 16 readable bytes; the load is unaligned.
        unsafe { _mm_loadu_si128(block.as_ptr().cast()) }
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(unsafe { _mm_add_epi64(self.0, other.0) })
    }

    #[inline(always)]
    unsafe fn add_sum(self, block: __m128i) -> Self {
        unsafe { Self(_mm_add_epi64(self.0, _mm_sad_epu8(block, _mm_setzero_si128()))) }
    }

    #[inline(always)]
    unsafe fn add_weighted(self, block: __m128i) -> Self {
        unsafe {
            let zero = _mm_setzero_si128();
            let lo = _mm_madd_epi16(
                _mm_unpacklo_epi8(block, zero),
                _mm_setr_epi16(16, 15, 14, 13, 12, 11, 10, 9),
            );
            let hi = _mm_madd_epi16(
                _mm_unpackhi_epi8(block, zero),
                _mm_setr_epi16(8, 7, 6, 5, 4, 3, 2, 1),
            );
            let products = _mm_add_epi32(lo, hi);
            let widened = _mm_add_epi64(
                _mm_unpacklo_epi32(products, zero),
                _mm_unpackhi_epi32(products, zero),
            );
            Self(_mm_add_epi64(self.0, widened))
        }
    }

    #[inline(always)]
    unsafe fn shift_block(self) -> Self {
        Self(unsafe { _mm_slli_epi64::<4>(self.0) })
    }

    #[inline(always)]
    unsafe fn fold(self) -> u64 {
        unsafe { hsum_epi64(self.0) }
    }
}

#[derive(Clone, Copy)]
pub(super) struct Avx2Wide32(__m256i);

impl Lanes for Avx2Wide32 {
    type Word = u32;
    type Block = (__m256i, __m256i);

    const BLOCK: usize = WIDE32_BLOCK;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(unsafe { _mm256_setzero_si256() })
    }

    #[inline(always)]
    unsafe fn load(block: &[u8]) -> Self::Block {
        debug_assert!(block.len() >= Self::BLOCK);
        let ptr = block.as_ptr().cast::<__m256i>();
        // SAFETY: `block` has 64 readable bytes; loads are unaligned.
        unsafe { (_mm256_loadu_si256(ptr), _mm256_loadu_si256(ptr.add(1))) }
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(unsafe { _mm256_add_epi32(self.0, other.0) })
    }

    #[inline(always)]
    unsafe fn add_sum(self, (first, second): Self::Block) -> Self {
        unsafe {
            let zero = _mm256_setzero_si256();
            let sums = _mm256_add_epi32(_mm256_sad_epu8(first, zero), _mm256_sad_epu8(second, zero));
            Self(_mm256_add_epi32(self.0, sums))
        }
    }

    #[inline(always)]
    unsafe fn add_weighted(self, (first, second): Self::Block) -> Self {
        unsafe {
            let ones = _mm256_set1_epi16(1);
            let w_first = _mm256_setr_epi8(
                64, 63, 62, 61, 60, 59, 58, 57, 56, 55, 54, 53, 52, 51, 50, 49, 48, 47, 46, 45,
                44, 43, 42, 41, 40, 39, 38, 37, 36, 35, 34, 33,
            );
            let w_second = _mm256_setr_epi8(
                32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13,
                12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
            );
            let p_first = _mm256_madd_epi16(_mm256_maddubs_epi16(first, w_first), ones);
            let p_second = _mm256_madd_epi16(_mm256_maddubs_epi16(second, w_second), ones);
            Self(_mm256_add_epi32(self.0, _mm256_add_epi32(p_first, p_second)))
        }
    }

    #[inline(always)]
    unsafe fn shift_block(self) -> Self {
        Self(unsafe { _mm256_slli_epi32::<6>(self.0) })
    }

    #[inline(always)]
    unsafe fn fold(self) -> u32 {
        unsafe {
            let halves = _mm_add_epi32(
                _mm256_castsi256_si128(self.0),
                _mm256_extracti128_si256::<1>(self.0),
            );
            hsum_epi32(halves)
        }
    }
}

#[derive(Clone, Copy)]
pub(super) struct Avx2Wide64(__m256i);

impl Lanes for Avx2Wide64 {
    type Word = u64;
    type Block = __m256i;

    const BLOCK: usize = WIDE64_BLOCK;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(unsafe { _mm256_setzero_si256() })
    }

    #[inline(always)]
    unsafe fn load(block: &[u8]) -> __m256i {
        debug_assert!(block.len() >= Self::BLOCK);
        // SAFETY: `block` has 32 readable bytes; the load is unaligned.
        unsafe { _mm256_loadu_si256(block.as_ptr().cast()) }
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(unsafe { _mm256_add_epi64(self.0, other.0) })
    }

    #[inline(always)]
    unsafe fn add_sum(self, block: __m256i) -> Self {
        unsafe { Self(_mm256_add_epi64(self.0, _mm256_sad_epu8(block, _mm256_setzero_si256()))) }
    }

    #[inline(always)]
    unsafe fn add_weighted(self, block: __m256i) -> Self {
        unsafe {
            let zero = _mm256_setzero_si256();
            let weights = _mm256_setr_epi8(
                32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13,
                12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
            );
            let products =
                _mm256_madd_epi16(_mm256_maddubs_epi16(block, weights), _mm256_set1_epi16(1));
            let widened = _mm256_add_epi64(
                _mm256_unpacklo_epi32(products, zero),
                _mm256_unpackhi_epi32(products, zero),
            );
            Self(_mm256_add_epi64(self.0, widened))
        }
    }

    #[inline(always)]
    unsafe fn shift_block(self) -> Self {
        Self(unsafe { _mm256_slli_epi64::<5>(self.0) })
    }

    #[inline(always)]
    unsafe fn fold(self) -> u64 {
        unsafe {
            let halves = _mm_add_epi64(
                _mm256_castsi256_si128(self.0),
                _mm256_extracti128_si256::<1>(self.0),
            );
            hsum_epi64(halves)
        }
    }
}

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn wide32_avx2(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
    // SAFETY: AVX2 is enabled for this function.
    unsafe { accumulate::<Adler32, Avx2Wide32>(s1, s2, blocks) }
}

/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn wide64_avx2(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
    // SAFETY: AVX2 is enabled for this function.
    unsafe { accumulate::<Adler64, Avx2Wide64>(s1, s2, blocks) }
}
