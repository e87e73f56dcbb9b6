//! Checksums over [`Read`] byte sources.

use std::io::{ErrorKind, Read};

use tracing::{debug, trace};

use crate::Engine;
use crate::error::Result;
use crate::variant::{Adler32, Adler64, Variant};

/// Bytes read per chunk.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Reads exactly `buf.len()` bytes or until EOF, returning the number of bytes read.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Checksum of everything `reader` yields, continuing from `seed`.
///
/// # Errors
/// Returns an error if reading from the reader fails.
pub fn checksum_reader<V: Variant, R: Read>(
    engine: Engine,
    seed: V::Word,
    mut reader: R,
) -> Result<V::Word> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut value = seed;
    let mut total: u64 = 0;

    loop {
        let bytes_read = read_exact_or_eof(&mut reader, &mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        trace!(bytes_read, "chunk");
        value = engine.checksum::<V>(value, &buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    debug!(%engine, width = %V::WIDTH, total, "checksummed reader");
    // An empty source still normalizes the seed.
    if total == 0 {
        value = engine.checksum::<V>(value, &[]);
    }
    Ok(value)
}

/// Adler-32 of a reader on the detected engine.
///
/// # Errors
/// Returns an error if reading from the reader fails.
pub fn adler32_reader<R: Read>(reader: R) -> Result<u32> {
    checksum_reader::<Adler32, R>(Engine::detect(), Adler32::SEED, reader)
}

/// Adler-64 of a reader on the detected engine.
///
/// # Errors
/// Returns an error if reading from the reader fails.
pub fn adler64_reader<R: Read>(reader: R) -> Result<u64> {
    checksum_reader::<Adler64, R>(Engine::detect(), Adler64::SEED, reader)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;
    use crate::reference;

    // Short reads, every other call interrupted.
    struct Choppy<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl Read for Choppy<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(ErrorKind::Interrupted.into());
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_reader_matches_slice() {
        let data: Vec<u8> = (0..3 * CHUNK_SIZE + 17).map(|i| (i * 13) as u8).collect();
        assert_eq!(adler32_reader(&data[..]).unwrap(), reference::checksum::<Adler32>(1, &data));
        assert_eq!(adler64_reader(&data[..]).unwrap(), reference::checksum::<Adler64>(1, &data));
    }

    #[test]
    fn test_short_and_interrupted_reads() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 241) as u8).collect();
        let reader = Choppy {
            data: &data,
            step: 7_001,
            interrupt: false,
        };
        let value = checksum_reader::<Adler32, _>(Engine::Scalar, 1, reader).unwrap();
        assert_eq!(value, reference::checksum::<Adler32>(1, &data));
    }

    #[test]
    fn test_empty_reader_normalizes_seed() {
        let seed = 0xffff_ffff;
        let value = checksum_reader::<Adler32, _>(Engine::Vector128, seed, std::io::empty()).unwrap();
        assert_eq!(value, reference::checksum::<Adler32>(seed, &[]));
    }

    #[test]
    fn test_read_error_propagates() {
        let err = adler32_reader(Broken).unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.to_string() == "disk on fire"));
    }
}
