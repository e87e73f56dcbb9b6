//! Bit-split reduction for moduli of the form `2^h - d`.
//!
//! Since `2^h ≡ d (mod m)`, a value `hi * 2^h + lo` is congruent to
//! `hi * d + lo`. Two such folds followed by one conditional subtraction give
//! the exact remainder whenever [`reduce_is_exact`] holds for the input range.

/// Replaces the high part above `half_bits` with `high * delta`.
#[inline(always)]
#[must_use]
pub const fn fold(x: u64, half_bits: u32, delta: u64) -> u64 {
    let mask = (1u64 << half_bits) - 1;
    (x & mask) + (x >> half_bits) * delta
}

/// Computes `x mod (2^half_bits - delta)` with two folds and one conditional
/// subtraction.
#[inline(always)]
#[must_use]
pub const fn reduce(x: u64, half_bits: u32, delta: u64) -> u64 {
    let modulus = (1u64 << half_bits) - delta;
    let x = fold(fold(x, half_bits, delta), half_bits, delta);
    if x >= modulus { x - modulus } else { x }
}

/// Checks that [`reduce`] is exact for every input up to `max`: neither fold
/// may overflow and the second fold must land below twice the modulus.
#[must_use]
pub const fn reduce_is_exact(max: u64, half_bits: u32, delta: u64) -> bool {
    if half_bits == 0 || half_bits >= 64 || delta == 0 || delta >= (1u64 << half_bits) {
        return false;
    }
    let low = (1u64 << half_bits) - 1;
    let modulus = (1u64 << half_bits) - delta;

    let Some(product) = (max >> half_bits).checked_mul(delta) else {
        return false;
    };
    let Some(first) = product.checked_add(low) else {
        return false;
    };
    let Some(second) = ((first >> half_bits) * delta).checked_add(low) else {
        return false;
    };
    (second as u128) < 2 * (modulus as u128)
}

/// `x mod 65521` for every `u32`, using `2^16 ≡ 15`.
#[inline(always)]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn mod_65521(x: u32) -> u32 {
    reduce(x as u64, 16, 15) as u32
}

/// `x mod 4294967291` for every `u64`, using `2^32 ≡ 5`.
#[inline(always)]
#[must_use]
pub const fn mod_4294967291(x: u64) -> u64 {
    reduce(x, 32, 5)
}

const _: () = assert!(reduce_is_exact(u32::MAX as u64, 16, 15));
const _: () = assert!(reduce_is_exact(u64::MAX, 32, 5));
