use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::Error;
use crate::variant::{Adler32, Adler64, Variant};
use crate::{config, reference, scalar, vector};

/// Implementation tier. Every tier returns the same checksum for the same
/// seed and input; they differ only in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Engine {
    /// One modulo per byte.
    Reference,
    /// Deferred modulo, 16 bytes per step.
    Scalar,
    /// 16-byte vectors (SSE2 on x86-64).
    Vector128,
    /// 32-byte vectors (AVX2 on x86-64, detected at runtime).
    Vector256,
}

impl Engine {
    pub const ALL: [Engine; 4] = [
        Engine::Reference,
        Engine::Scalar,
        Engine::Vector128,
        Engine::Vector256,
    ];

    /// Checksum of `data` continuing from the packed `seed`.
    #[must_use]
    pub fn checksum<V: Variant>(self, seed: V::Word, data: &[u8]) -> V::Word {
        match self {
            Engine::Reference => reference::checksum::<V>(seed, data),
            Engine::Scalar => scalar::checksum::<V>(seed, data),
            Engine::Vector128 => vector::narrow::<V>(seed, data),
            Engine::Vector256 => vector::wide::<V>(seed, data),
        }
    }

    #[must_use]
    pub fn adler32(self, seed: u32, data: &[u8]) -> u32 {
        self.checksum::<Adler32>(seed, data)
    }

    #[must_use]
    pub fn adler64(self, seed: u64, data: &[u8]) -> u64 {
        self.checksum::<Adler64>(seed, data)
    }

    /// Fastest tier for the running CPU.
    #[must_use]
    pub fn fastest() -> Self {
        if vector::wide_is_accelerated() {
            Engine::Vector256
        } else {
            Engine::Vector128
        }
    }

    /// [`Engine::fastest`] unless overridden through
    /// [`ENGINE_ENV`](crate::config::ENGINE_ENV).
    ///
    /// Reads the environment on every call.
    #[must_use]
    pub fn detect() -> Self {
        if let Some(engine) = config::engine_override() {
            debug!(%engine, "engine forced by {}", config::ENGINE_ENV);
            return engine;
        }
        let engine = Self::fastest();
        debug!(%engine, "engine auto-selected");
        engine
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Engine::Reference => "reference",
            Engine::Scalar => "scalar",
            Engine::Vector128 => "vector128",
            Engine::Vector256 => "vector256",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let matches = |names: &[&str]| names.iter().any(|n| name.eq_ignore_ascii_case(n));

        if matches(&["reference", "ref"]) {
            Ok(Engine::Reference)
        } else if matches(&["scalar"]) {
            Ok(Engine::Scalar)
        } else if matches(&["vector128", "narrow", "sse2"]) {
            Ok(Engine::Vector128)
        } else if matches(&["vector256", "wide", "avx2"]) {
            Ok(Engine::Vector256)
        } else {
            Err(Error::UnknownEngine(s.to_owned()))
        }
    }
}

/// Checksum width: Adler-32 or Adler-64.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    #[cfg_attr(feature = "serde", serde(rename = "adler32"))]
    W32,
    #[cfg_attr(feature = "serde", serde(rename = "adler64"))]
    W64,
}

impl Width {
    /// Largest packed seed this width accepts.
    #[must_use]
    pub const fn max_seed(self) -> u64 {
        match self {
            Width::W32 => u32::MAX as u64,
            Width::W64 => u64::MAX,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Width::W32 => "adler32",
            Width::W64 => "adler64",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Width {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if ["adler32", "adler-32", "32"].iter().any(|n| name.eq_ignore_ascii_case(n)) {
            Ok(Width::W32)
        } else if ["adler64", "adler-64", "64"].iter().any(|n| name.eq_ignore_ascii_case(n)) {
            Ok(Width::W64)
        } else {
            Err(Error::UnknownWidth(s.to_owned()))
        }
    }
}
