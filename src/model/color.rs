//! RGB colors and the deck theme.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Accent used when no usable color can be sampled.
pub const FALLBACK_ACCENT: Rgb = Rgb::new(0x2C, 0x5A, 0xA0);

/// Mix factor (percent toward white) for the light theme variant.
pub const LIGHTEN_PERCENT: u8 = 45;

/// An opaque 24-bit RGB color, rendered as six upper-case hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse six hex digits, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::new(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ))
    }

    /// Upper-case, zero-padded hex form (`2C5AA0`).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Blend each channel toward white by `percent`.
    ///
    /// `channel + round((255 - channel) * percent / 100)`, clamped to 255.
    pub fn lighten(&self, percent: u8) -> Self {
        let mix = |c: u8| -> u8 {
            let delta = ((255.0 - c as f64) * percent as f64 / 100.0).round();
            (c as f64 + delta).min(255.0) as u8
        };
        Self::new(mix(self.r), mix(self.g), mix(self.b))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s).ok_or_else(|| format!("invalid hex color: {:?}", s))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Brand colors threaded through every themed slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Base accent (header bands, KPI values, property name)
    pub accent: Rgb,
    /// Accent blended 45% toward white (card title strips)
    pub light: Rgb,
}

impl Theme {
    /// Derive a theme from an accent color.
    pub fn from_accent(accent: Rgb) -> Self {
        Self {
            accent,
            light: accent.lighten(LIGHTEN_PERCENT),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_accent(FALLBACK_ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgb::from_hex("#2c5aa0").unwrap();
        assert_eq!(color, FALLBACK_ACCENT);
        assert_eq!(color.to_hex(), "2C5AA0");
        assert_eq!(Rgb::new(0, 0, 0x0A).to_hex(), "00000A");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Rgb::from_hex("12345").is_none());
        assert!(Rgb::from_hex("GGGGGG").is_none());
        assert!("1234567".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_lighten_black() {
        let light = Rgb::from_hex("000000").unwrap().lighten(45);
        assert_eq!(light.to_hex(), "737373");
    }

    #[test]
    fn test_lighten_white_is_fixed_point() {
        for percent in [0, 10, 45, 100] {
            assert_eq!(Rgb::WHITE.lighten(percent).to_hex(), "FFFFFF");
        }
    }

    #[test]
    fn test_lighten_full_is_white() {
        assert_eq!(FALLBACK_ACCENT.lighten(100), Rgb::WHITE);
    }

    #[test]
    fn test_theme_from_accent() {
        let theme = Theme::from_accent(FALLBACK_ACCENT);
        assert_eq!(theme.accent.to_hex(), "2C5AA0");
        // 0x2C=44 -> 44+round(211*0.45)=139, 0x5A=90 -> 164, 0xA0=160 -> 203
        assert_eq!(theme.light.to_hex(), "8BA4CB");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&FALLBACK_ACCENT).unwrap();
        assert_eq!(json, "\"2C5AA0\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FALLBACK_ACCENT);
    }
}
