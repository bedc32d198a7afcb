//! Hex colours as they appear in the rice palettes.
use crate::{Error, Result};
use penrose::Color;
use std::{fmt, str::FromStr};

/// A 24-bit RGB colour.
///
/// Palettes are written the way they are in most rice dotfiles: `#rrggbb`,
/// occasionally without the leading `#`. Both forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(u32);

impl Rgb {
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0xff_ffff)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_owned()));
        }

        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| Error::InvalidColor(s.to_owned()))
    }

    /// Packed as `0xRRGGBBAA` with a fully opaque alpha channel.
    pub fn rgba(&self) -> u32 {
        (self.0 << 8) | 0xff
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::new_from_hex(c.rgba())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#90d4ed", 0x90d4ed)]
    #[case("#AEC6CF", 0xaec6cf)]
    #[case("FFFFFF", 0xffffff)]
    #[case("#000000", 0x000000)]
    fn parse_accepts_palette_forms(#[case] s: &str, #[case] expected: u32) {
        assert_eq!(Rgb::parse(s).unwrap(), Rgb::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case("#fff")]
    #[case("#90d4edff")]
    #[case("#90d4eg")]
    #[case("##90d4e")]
    fn parse_rejects_malformed(#[case] s: &str) {
        assert!(matches!(Rgb::parse(s), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn display_is_lowercase_with_hash() {
        let c: Rgb = "FFCC33".parse().unwrap();

        assert_eq!(c.to_string(), "#ffcc33");
    }

    #[test]
    fn rgba_is_opaque() {
        assert_eq!(Rgb::new(0x1d0b21).rgba(), 0x1d0b21ff);
    }
}
