//! Error types for libadler

use thiserror::Error;

use crate::Width;

/// Result type alias for libadler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for libadler
///
/// Computing a checksum over bytes already in memory never fails. Errors come
/// from reading a byte source, parsing names, or a seed that does not fit the
/// requested width.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading a byte source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine name not recognised
    #[error("unknown engine {0:?}, expected reference, scalar, vector128 or vector256")]
    UnknownEngine(String),

    /// Width name not recognised
    #[error("unknown checksum width {0:?}, expected adler32 or adler64")]
    UnknownWidth(String),

    /// Seed has bits above the packed checksum width
    #[error("seed {seed:#x} does not fit an {width} checksum")]
    SeedOutOfRange { seed: u64, width: Width },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::SeedOutOfRange {
            seed: 0x1_0000_0000,
            width: Width::W32,
        };
        assert_eq!(err.to_string(), "seed 0x100000000 does not fit an adler32 checksum");
        assert!(Error::UnknownEngine("neon".into()).to_string().contains("\"neon\""));
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
