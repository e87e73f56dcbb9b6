//! Deferred-modulo scalar engine.
//!
//! Bytes are accumulated 16 at a time into wide `s1`/`s2` and reduced once per
//! `NMAX`-bounded run with the bit-split reduction instead of once per byte.

use crate::variant::Variant;

/// Bytes per unrolled step.
pub const UNROLL: usize = 16;

/// Bytes consumed between reductions in the bulk phase: `NMAX` rounded down to
/// a whole number of unrolled steps.
#[must_use]
pub const fn bulk_len(nmax: usize) -> usize {
    nmax / UNROLL * UNROLL
}

/// Computes the checksum of `data` starting from the packed `seed`.
#[must_use]
pub fn checksum<V: Variant>(seed: V::Word, data: &[u8]) -> V::Word {
    let (mut s1, mut s2) = V::unpack(seed);

    match data {
        [] => {}
        [byte] => {
            s1 += V::Word::from(*byte);
            if s1 >= V::MODULUS {
                s1 -= V::MODULUS;
            }
            s2 += s1;
            if s2 >= V::MODULUS {
                s2 -= V::MODULUS;
            }
        }
        short if short.len() < UNROLL => {
            for &byte in short {
                s1 += V::Word::from(byte);
                s2 += s1;
            }
            s1 %= V::MODULUS;
            s2 %= V::MODULUS;
        }
        _ => {
            let mut runs = data.chunks_exact(bulk_len(V::NMAX));
            for run in runs.by_ref() {
                for chunk in run.chunks_exact(UNROLL) {
                    accumulate16::<V>(&mut s1, &mut s2, chunk);
                }
                V::reduce_pair(&mut s1, &mut s2);
            }
            tail::<V>(&mut s1, &mut s2, runs.remainder());
        }
    }

    V::pack(s1, s2)
}

/// Accumulates fewer than `NMAX` trailing bytes and reduces.
#[inline]
pub(crate) fn tail<V: Variant>(s1: &mut V::Word, s2: &mut V::Word, data: &[u8]) {
    if data.is_empty() {
        return;
    }
    debug_assert!(data.len() < V::NMAX, "tail of {} bytes", data.len());

    let mut chunks = data.chunks_exact(UNROLL);
    for chunk in chunks.by_ref() {
        accumulate16::<V>(s1, s2, chunk);
    }
    for &byte in chunks.remainder() {
        *s1 += V::Word::from(byte);
        *s2 += *s1;
    }
    V::reduce_pair(s1, s2);
}

/// Sixteen `s1 += b; s2 += s1` steps folded into one update:
/// `s2 += 16 * s1 + 16 * b0 + 15 * b1 + ... + 1 * b15`.
#[inline(always)]
fn accumulate16<V: Variant>(s1: &mut V::Word, s2: &mut V::Word, chunk: &[u8]) {
    let w = |i: usize| V::Word::from(chunk[i]);
    let weight = |k: u8| V::Word::from(k);

    let (b0, b1, b2, b3) = (w(0), w(1), w(2), w(3));
    let (b4, b5, b6, b7) = (w(4), w(5), w(6), w(7));
    let (b8, b9, b10, b11) = (w(8), w(9), w(10), w(11));
    let (b12, b13, b14, b15) = (w(12), w(13), w(14), w(15));

    *s2 += (*s1 << 4)
        + b0 * weight(16)
        + b1 * weight(15)
        + b2 * weight(14)
        + b3 * weight(13)
        + b4 * weight(12)
        + b5 * weight(11)
        + b6 * weight(10)
        + b7 * weight(9)
        + b8 * weight(8)
        + b9 * weight(7)
        + b10 * weight(6)
        + b11 * weight(5)
        + b12 * weight(4)
        + b13 * weight(3)
        + b14 * weight(2)
        + b15;

    *s1 += b0 + b1 + b2 + b3 + b4 + b5 + b6 + b7 + b8 + b9 + b10 + b11 + b12 + b13 + b14 + b15;
}

const _: () = assert!(bulk_len(5552) == 5552);
