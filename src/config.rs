//! Runtime configuration.
//!
//! The only knob is a forced engine, read from the environment each time
//! [`Engine::detect`] runs. Every engine works on every CPU (the wide tier
//! falls back to portable lanes), so a forced engine needs no clamping.

use tracing::warn;

use crate::Engine;

/// Environment variable naming the engine [`Engine::detect`] should return.
///
/// Accepts anything [`Engine`]'s `FromStr` does. Empty or `auto` means no
/// override.
pub const ENGINE_ENV: &str = "LIBADLER_ENGINE";

/// Engine forced through [`ENGINE_ENV`], if any.
#[must_use]
pub fn engine_override() -> Option<Engine> {
    let value = std::env::var(ENGINE_ENV).ok()?;
    parse_override(&value)
}

fn parse_override(value: &str) -> Option<Engine> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return None;
    }
    match value.parse() {
        Ok(engine) => Some(engine),
        Err(err) => {
            warn!(%err, "ignoring {ENGINE_ENV}");
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("scalar"), Some(Engine::Scalar));
        assert_eq!(parse_override("  Vector256\n"), Some(Engine::Vector256));
        assert_eq!(parse_override(""), None);
        assert_eq!(parse_override("auto"), None);
        assert_eq!(parse_override("gpu"), None);
    }
}
