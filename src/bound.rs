//! Overflow bounds for deferred reduction.
//!
//! Starting from `s1, s2 < m`, feeding `n` bytes of `0xff` grows `s2` to at most
//! `(n + 1) * (m - 1) + 255 * n * (n + 1) / 2`. `NMAX` is the largest `n` for
//! which that still fits the accumulator. Every other ordering of the same bytes
//! (16-way unrolling, per-lane partial sums, the shifted carry-forward term)
//! only splits this total into non-negative parts, so the same `n` bounds them
//! all as long as a group is never longer than `NMAX` bytes.

/// Largest byte value fed into the accumulators.
const BYTE_MAX: u128 = u8::MAX as u128;

/// Worst-case value of `s2` after `n` bytes, before any reduction.
#[must_use]
pub const fn worst_case_s2(n: u64, modulus: u64) -> u128 {
    let n = n as u128;
    let m = modulus as u128;
    (n + 1) * (m - 1) + BYTE_MAX * n * (n + 1) / 2
}

/// Largest number of bytes that can be accumulated into an unsigned integer of
/// `bits` bits before `s2` has to be reduced modulo `modulus`.
///
/// # Panics
///
/// Panics (at compile time when used in a constant) if `bits` is not in `1..=64`.
#[must_use]
pub const fn nmax(modulus: u64, bits: u32) -> u64 {
    assert!(bits > 0 && bits <= 64, "accumulator width must be 1..=64 bits");
    let limit = (1u128 << bits) - 1;

    // 255 * n^2 / 2 alone exceeds 2^bits once n reaches 2^(bits / 2).
    let mut lo = 0u128;
    let mut hi = 1u128 << (bits / 2);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if worst_case_s2(mid as u64, modulus) <= limit {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo as u64
}

/// Number of whole `block`-byte blocks that fit in one `nmax`-bounded group.
#[must_use]
pub const fn group_blocks(nmax: usize, block: usize) -> usize {
    nmax / block
}

/// Length in bytes of one reduction group made of whole `block`-byte blocks.
///
/// # Panics
///
/// Panics if `block` is larger than `nmax`.
#[must_use]
pub const fn group_len(nmax: usize, block: usize) -> usize {
    let blocks = group_blocks(nmax, block);
    assert!(blocks > 0, "block is larger than the reduction bound");
    blocks * block
}

/// Largest sum of two adjacent `byte * weight` products inside one block, the
/// intermediate a pairwise multiply-add instruction holds in a 16-bit lane.
#[must_use]
pub const fn pair_product_max(block: usize) -> u64 {
    let block = block as u64;
    255 * (block + block - 1)
}
