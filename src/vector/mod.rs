//! Fixed-width vectorized engines.
//!
//! Whole blocks are accumulated in parallel lanes and the leftover bytes go
//! through [`scalar::tail`](crate::scalar). Inside one `NMAX`-bounded group:
//!
//! - `v_s1` holds per-lane byte sums,
//! - `v_s2` holds per-lane sums of `byte * weight`, weights running from the
//!   block size down to 1 so the first byte of a block weighs the most,
//! - `v_ps` adds up `v_s1` as it was before each block, i.e. for every byte
//!   the number of blocks that follow it in the group.
//!
//! At the end of the group `v_ps * block` is added to `v_s2`, the lanes are
//! folded, and `s2` additionally receives `s1 * group_len` for the bytes that
//! preceded the group.

mod portable;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub(crate) use portable::Portable;

use crate::bound;
use crate::scalar;
use crate::variant::{Adler32, Adler64, Variant, Word};

pub(crate) const NARROW32_BLOCK: usize = 32;
pub(crate) const WIDE32_BLOCK: usize = 64;
pub(crate) const NARROW64_BLOCK: usize = 16;
pub(crate) const WIDE64_BLOCK: usize = 32;

#[cfg_attr(all(target_arch = "x86_64", target_feature = "sse2"), allow(dead_code))]
pub(crate) type PortableNarrow32 = Portable<u32, 4, NARROW32_BLOCK>;
pub(crate) type PortableWide32 = Portable<u32, 8, WIDE32_BLOCK>;
#[cfg_attr(all(target_arch = "x86_64", target_feature = "sse2"), allow(dead_code))]
pub(crate) type PortableNarrow64 = Portable<u64, 2, NARROW64_BLOCK>;
pub(crate) type PortableWide64 = Portable<u64, 4, WIDE64_BLOCK>;

/// Lane-parallel accumulator over fixed-size blocks.
///
/// # Safety
///
/// Every method may use instructions outside the target's baseline. Callers
/// must make sure the running CPU supports whatever the implementation needs.
pub(crate) trait Lanes: Copy {
    type Word: Word;
    type Block: Copy;

    const BLOCK: usize;

    unsafe fn zero() -> Self;

    unsafe fn load(block: &[u8]) -> Self::Block;

    unsafe fn add(self, other: Self) -> Self;

    unsafe fn add_sum(self, block: Self::Block) -> Self;

    /// Weights run from `BLOCK` for the first byte down to 1.
    unsafe fn add_weighted(self, block: Self::Block) -> Self;

    unsafe fn shift_block(self) -> Self;

    unsafe fn fold(self) -> Self::Word;
}

/// Accumulates `blocks` into `s1`/`s2`, reducing after every group.
///
/// # Safety
///
/// The CPU must support the instructions `L` is built on.
#[inline(always)]
pub(crate) unsafe fn accumulate<V, L>(s1: &mut V::Word, s2: &mut V::Word, blocks: &[u8])
where
    V: Variant,
    L: Lanes<Word = V::Word>,
{
    debug_assert_eq!(blocks.len() % L::BLOCK, 0);
    let group = bound::group_len(V::NMAX, L::BLOCK);

    for run in blocks.chunks(group) {
        debug_assert!(run.len() <= V::NMAX);
        *s2 += *s1 * V::Word::from_len(run.len());

        // SAFETY: forwarded from the caller.
        unsafe {
            let mut v_s1 = L::zero();
            let mut v_s2 = L::zero();
            let mut v_ps = L::zero();

            for block in run.chunks_exact(L::BLOCK) {
                let bytes = L::load(block);
                v_ps = v_ps.add(v_s1);
                v_s1 = v_s1.add_sum(bytes);
                v_s2 = v_s2.add_weighted(bytes);
            }
            v_s2 = v_s2.add(v_ps.shift_block());

            *s1 += v_s1.fold();
            *s2 += v_s2.fold();
        }
        V::reduce_pair(s1, s2);
    }
}

/// Narrow engine: checksum of `data` starting from the packed `seed`.
#[must_use]
pub fn narrow<V: Variant>(seed: V::Word, data: &[u8]) -> V::Word {
    let (mut s1, mut s2) = V::unpack(seed);
    let (blocks, rest) = data.split_at(data.len() - data.len() % V::NARROW_BLOCK);
    if !blocks.is_empty() {
        V::narrow_blocks(&mut s1, &mut s2, blocks);
    }
    scalar::tail::<V>(&mut s1, &mut s2, rest);
    V::pack(s1, s2)
}

/// Wide engine: checksum of `data` starting from the packed `seed`.
#[must_use]
pub fn wide<V: Variant>(seed: V::Word, data: &[u8]) -> V::Word {
    let (mut s1, mut s2) = V::unpack(seed);
    let (blocks, rest) = data.split_at(data.len() - data.len() % V::WIDE_BLOCK);
    if !blocks.is_empty() {
        V::wide_blocks(&mut s1, &mut s2, blocks);
    }
    scalar::tail::<V>(&mut s1, &mut s2, rest);
    V::pack(s1, s2)
}

/// Whether the wide engine runs on AVX2 rather than portable lanes.
#[must_use]
pub fn wide_is_accelerated() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::arch::is_x86_feature_detected!("avx2")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub(crate) fn narrow32(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
    // SAFETY: SSE2 is enabled at compile time.
    unsafe { accumulate::<Adler32, x86_64::Sse2Narrow32>(s1, s2, blocks) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
pub(crate) fn narrow32(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
    // SAFETY: portable lanes use no target-specific instructions.
    unsafe { accumulate::<Adler32, PortableNarrow32>(s1, s2, blocks) }
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub(crate) fn narrow64(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
    // SAFETY: SSE2 is enabled at compile time.
    unsafe { accumulate::<Adler64, x86_64::Sse2Narrow64>(s1, s2, blocks) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
pub(crate) fn narrow64(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
    // SAFETY: portable lanes use no target-specific instructions.
    unsafe { accumulate::<Adler64, PortableNarrow64>(s1, s2, blocks) }
}

pub(crate) fn wide32(s1: &mut u32, s2: &mut u32, blocks: &[u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            // SAFETY: AVX2 support was just detected.
            unsafe { x86_64::wide32_avx2(s1, s2, blocks) };
            return;
        }
    }
    // SAFETY: portable lanes use no target-specific instructions.
    unsafe { accumulate::<Adler32, PortableWide32>(s1, s2, blocks) }
}

pub(crate) fn wide64(s1: &mut u64, s2: &mut u64, blocks: &[u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            // SAFETY: AVX2 support was just detected.
            unsafe { x86_64::wide64_avx2(s1, s2, blocks) };
            return;
        }
    }
    // SAFETY: portable lanes use no target-specific instructions.
    unsafe { accumulate::<Adler64, PortableWide64>(s1, s2, blocks) }
}
