use super::Lanes;
use crate::variant::Word;

/// Array-backed lanes; `LANES` accumulators each owning `BYTES / LANES`
/// consecutive bytes of every block. Written so the compiler can vectorize it
/// on any target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Portable<W, const LANES: usize, const BYTES: usize>([W; LANES]);

impl<W: Word, const LANES: usize, const BYTES: usize> Portable<W, LANES, BYTES> {
    const PER_LANE: usize = {
        assert!(BYTES.is_power_of_two(), "block size must be a power of two");
        assert!(LANES > 0 && BYTES % LANES == 0, "lanes must split the block evenly");
        BYTES / LANES
    };
}

impl<W: Word, const LANES: usize, const BYTES: usize> Lanes for Portable<W, LANES, BYTES> {
    type Word = W;
    type Block = [u8; BYTES];

    const BLOCK: usize = BYTES;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self([W::ZERO; LANES])
    }

    #[inline(always)]
    unsafe fn load(block: &[u8]) -> [u8; BYTES] {
        let mut bytes = [0u8; BYTES];
        bytes.copy_from_slice(&block[..BYTES]);
        bytes
    }

    #[inline(always)]
    unsafe fn add(mut self, other: Self) -> Self {
        for (lane, rhs) in self.0.iter_mut().zip(other.0) {
            *lane += rhs;
        }
        self
    }

    #[inline(always)]
    unsafe fn add_sum(mut self, block: [u8; BYTES]) -> Self {
        for (lane, bytes) in self.0.iter_mut().zip(block.chunks_exact(Self::PER_LANE)) {
            *lane += bytes.iter().fold(W::ZERO, |acc, &b| acc + W::from(b));
        }
        self
    }

    #[inline(always)]
    unsafe fn add_weighted(mut self, block: [u8; BYTES]) -> Self {
        for (i, (lane, bytes)) in self
            .0
            .iter_mut()
            .zip(block.chunks_exact(Self::PER_LANE))
            .enumerate()
        {
            let first = BYTES - i * Self::PER_LANE;
            *lane += bytes
                .iter()
                .enumerate()
                .fold(W::ZERO, |acc, (j, &b)| acc + W::from(b) * W::from_len(first - j));
        }
        self
    }

    #[inline(always)]
    unsafe fn shift_block(mut self) -> Self {
        let shift = BYTES.trailing_zeros();
        for lane in &mut self.0 {
            *lane = *lane << shift;
        }
        self
    }

    #[inline(always)]
    unsafe fn fold(self) -> W {
        self.0.iter().fold(W::ZERO, |acc, &lane| acc + lane)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    type Narrow = Portable<u32, 4, 32>;

    #[test]
    fn test_weights_descend_across_lanes() {
        let mut block = [0u8; 32];
        block[0] = 1;
        block[8] = 1;
        block[31] = 1;
        // SAFETY: portable lanes use no target-specific instructions.
        let (sum, weighted) = unsafe {
            let bytes = Narrow::load(&block);
            (Narrow::zero().add_sum(bytes).fold(), Narrow::zero().add_weighted(bytes).fold())
        };
        assert_eq!(sum, 3);
        assert_eq!(weighted, 32 + 24 + 1);
    }

    #[test]
    fn test_shift_block_multiplies_by_block() {
        // SAFETY: portable lanes use no target-specific instructions.
        let shifted = unsafe {
            let bytes = Narrow::load(&[1u8; 32]);
            Narrow::zero().add_sum(bytes).shift_block().fold()
        };
        assert_eq!(shifted, 32 * 32);
    }
}
