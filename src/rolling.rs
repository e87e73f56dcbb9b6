use std::hash::Hasher;
use std::io;
use std::marker::PhantomData;

use crate::Engine;
use crate::variant::{Adler32, Variant, Word};

/// Incremental checksum state.
///
/// Bytes can be appended with [`update`](Self::update), and a fixed-size
/// window can be slid one byte at a time with [`roll`](Self::roll).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollingChecksum<V: Variant = Adler32> {
    s1: V::Word,
    s2: V::Word,
    engine: Engine,
    _variant: PhantomData<V>,
}

impl<V: Variant> Default for RollingChecksum<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Variant> RollingChecksum<V> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Engine::fastest())
    }

    #[inline]
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        let (s1, s2) = V::unpack(V::SEED);
        Self {
            s1,
            s2,
            engine,
            _variant: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn from_checksum(checksum: V::Word) -> Self {
        let (s1, s2) = V::unpack(checksum);
        Self {
            s1,
            s2,
            ..Self::new()
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> V::Word {
        V::pack(self.s1, self.s2)
    }

    #[inline]
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    pub fn update(&mut self, data: &[u8]) {
        let packed = self.engine.checksum::<V>(self.value(), data);
        (self.s1, self.s2) = V::unpack(packed);
    }

    /// Slides a window of `window_size` bytes forward by one: `old_byte`
    /// leaves at the front, `new_byte` enters at the back.
    ///
    /// Only meaningful when the state holds the checksum of exactly that
    /// window, started from the default seed.
    pub fn roll(&mut self, old_byte: u8, new_byte: u8, window_size: usize) {
        let m = V::MODULUS;
        let old = V::Word::from(old_byte);
        let new = V::Word::from(new_byte);
        let n = V::reduce_len(window_size);

        self.s1 = (self.s1 + (m - old) + new) % m;
        self.s2 = (self.s2 + self.s1 + (m - V::Word::ONE) - (n * old % m)) % m;
    }

    pub fn reset(&mut self) {
        (self.s1, self.s2) = V::unpack(V::SEED);
    }

    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> V::Word {
        Engine::fastest().checksum::<V>(V::SEED, data)
    }
}

impl<V: Variant> Hasher for RollingChecksum<V> {
    fn finish(&self) -> u64 {
        self.value().into()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

impl<V: Variant> io::Write for RollingChecksum<V> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Adler64, reference};

    fn adler32_scalar(data: &[u8]) -> u32 {
        let mut a: u32 = 1;
        let mut b: u32 = 0;
        for &byte in data {
            a = (a + u32::from(byte)) % 65_521;
            b = (b + a) % 65_521;
        }
        (b << 16) | a
    }

    #[test]
    fn test_correctness() {
        let data: Vec<u8> = (0..1_000_000).map(|i| i as u8).collect();
        assert_eq!(RollingChecksum::<Adler32>::compute(&data), adler32_scalar(&data));
        assert_eq!(
            RollingChecksum::<Adler64>::compute(&data),
            reference::checksum::<Adler64>(1, &data)
        );
    }

    #[test]
    fn test_update_in_pieces() {
        let data: Vec<u8> = (0..70_000u32).map(|i| (i % 253) as u8).collect();
        for engine in Engine::ALL {
            let mut rolling = RollingChecksum::<Adler32>::with_engine(engine);
            for piece in data.chunks(999) {
                rolling.update(piece);
            }
            assert_eq!(rolling.value(), adler32_scalar(&data), "{engine}");
        }
    }

    fn check_roll<V: Variant>(data: &[u8], window: usize) {
        let mut rolling = RollingChecksum::<V>::new();
        rolling.update(&data[..window]);
        for start in 1..=data.len() - window {
            rolling.roll(data[start - 1], data[start + window - 1], window);
            assert_eq!(
                rolling.value(),
                reference::checksum::<V>(V::SEED, &data[start..start + window]),
                "start {start}"
            );
        }
    }

    #[test]
    fn test_roll_matches_fresh_checksum() {
        let data: Vec<u8> = (0..3000u32).map(|i| (i * 89 % 256) as u8).collect();
        check_roll::<Adler32>(&data, 16);
        check_roll::<Adler32>(&data, 1024);
        check_roll::<Adler64>(&data, 16);
        check_roll::<Adler64>(&data, 1024);
    }

    #[test]
    fn test_roll_saturated_window() {
        let mut data = vec![0xffu8; 700];
        data.extend(std::iter::repeat_n(0u8, 700));
        check_roll::<Adler32>(&data, 600);
        check_roll::<Adler64>(&data, 600);
    }

    #[test]
    fn test_roll_window_longer_than_modulus() {
        let window = 70_000;
        let data: Vec<u8> = (0..window + 200).map(|i| (i * 7 % 256) as u8).collect();
        check_roll::<Adler32>(&data, window);
        check_roll::<Adler64>(&data, window);
    }

    #[test]
    fn test_reset_and_resume() {
        let mut rolling: RollingChecksum = RollingChecksum::new();
        rolling.update(b"garbage");
        rolling.reset();
        rolling.update(b"Wiki");
        let mut resumed = RollingChecksum::<Adler32>::from_checksum(rolling.value());
        resumed.update(b"pedia");
        assert_eq!(resumed.value(), 0x11E6_0398);
    }

    #[test]
    fn test_hasher_and_writer() {
        let mut hasher = RollingChecksum::<Adler64>::new();
        hasher.write(b"Wikipedia");
        assert_eq!(hasher.finish(), reference::checksum::<Adler64>(1, b"Wikipedia"));

        let mut writer = RollingChecksum::<Adler32>::new();
        io::copy(&mut &b"Wikipedia"[..], &mut writer).unwrap();
        assert_eq!(writer.finish(), 0x11E6_0398);
    }
}
