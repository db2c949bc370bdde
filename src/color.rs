//! Color Selector

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IdenticonError, IdenticonResult};
use crate::hashing::Digest;

/// Strict `#rrggbb` color. The only text the renderer interpolates besides
/// numbers, so it is validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn parse(s: &str) -> IdenticonResult<Self> {
        let valid = s.len() == 7
            && s.starts_with('#')
            && s[1..].bytes().all(|b| b.is_ascii_hexdigit());
        if !valid {
            return Err(IdenticonError::invalid_argument(format!(
                "color must be #RRGGBB, got {:?}",
                s
            )));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn white() -> Self {
        Self("#ffffff".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// `#` followed by the first six digest characters.
pub fn select_color(digest: &Digest) -> IdenticonResult<Color> {
    let hex = digest.as_str();
    if hex.len() < 6 {
        return Err(IdenticonError::invalid_argument(format!(
            "color needs a digest of at least 6 hex characters, got {}",
            hex.len()
        )));
    }
    Color::parse(&format!("#{}", &hex[..6]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::generate_hash;

    #[test]
    fn test_select_color_prefix() {
        let d = generate_hash("hello", 16).unwrap();
        assert_eq!(select_color(&d).unwrap().as_str(), "#2b1741");
    }

    #[test]
    fn test_color_format_for_any_long_digest() {
        for seed in ["", "a", "zebra", "550e8400-e29b-41d4-a716-446655440000"] {
            for bytes in [3, 4, 16, 32] {
                let c = select_color(&generate_hash(seed, bytes).unwrap()).unwrap();
                let s = c.as_str();
                assert_eq!(s.len(), 7);
                assert!(s.starts_with('#'));
                assert!(s[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn test_short_digest_rejected() {
        let d = Digest::parse("abcde").unwrap();
        assert!(select_color(&d).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_is_strict() {
        assert!(Color::parse("#A1b2C3").is_ok());
        assert_eq!(Color::parse("#A1B2C3").unwrap().as_str(), "#a1b2c3");
        for bad in ["", "#fff", "a1b2c3", "#a1b2c3d", "#zzzzzz", "#12345\""] {
            assert!(Color::parse(bad).is_err(), "{bad} should be rejected");
        }
    }
}
