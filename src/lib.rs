//! Adler-32 and Adler-64 checksums.
//!
//! Both widths run on four interchangeable engines ([`Engine`]): a
//! byte-at-a-time reference, a deferred-modulo scalar loop, and 16-byte and
//! 32-byte vector kernels. All of them return the same value for the same
//! seed and input, and a checksum can be continued by passing it back in as
//! the seed:
//!
//! ```
//! use libadler::{Engine, adler32};
//!
//! assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
//!
//! let head = Engine::Scalar.adler32(1, b"Wiki");
//! assert_eq!(Engine::Vector256.adler32(head, b"pedia"), 0x11E6_0398);
//! ```
//!
//! [`RollingChecksum`] keeps the state between calls and can slide a fixed
//! window one byte at a time; [`io`] checksums any [`std::io::Read`].

pub mod bound;
pub mod config;
mod engine;
pub mod error;
pub mod io;
pub mod modulo;
pub mod reference;
pub mod rolling;
pub mod scalar;
mod variant;
pub mod vector;

pub use engine::{Engine, Width};
pub use error::{Error, Result};
pub use rolling::RollingChecksum;
pub use variant::{Adler32, Adler64, Variant, Word};

/// Adler-32 of `data` on the fastest engine.
#[inline]
#[must_use]
pub fn adler32(data: &[u8]) -> u32 {
    Engine::fastest().adler32(Adler32::SEED, data)
}

/// Adler-64 of `data` on the fastest engine.
#[inline]
#[must_use]
pub fn adler64(data: &[u8]) -> u64 {
    Engine::fastest().adler64(Adler64::SEED, data)
}

/// Checksum with engine and width chosen at runtime.
///
/// ```
/// use libadler::{Engine, Width, checksum};
///
/// let value = checksum(Engine::Reference, Width::W64, 1, b"a").unwrap();
/// assert_eq!(value, 0x0000_0062_0000_0062);
/// assert!(checksum(Engine::Scalar, Width::W32, u64::MAX, b"a").is_err());
/// ```
///
/// # Errors
/// Returns [`Error::SeedOutOfRange`] if `seed` is wider than `width`.
#[allow(clippy::cast_possible_truncation)]
pub fn checksum(engine: Engine, width: Width, seed: u64, data: &[u8]) -> Result<u64> {
    if seed > width.max_seed() {
        return Err(Error::SeedOutOfRange { seed, width });
    }
    match width {
        Width::W32 => Ok(u64::from(engine.adler32(seed as u32, data))),
        Width::W64 => Ok(engine.adler64(seed, data)),
    }
}
