//=========================================================================
// Color
//=========================================================================
//
// RGB color with components in [0, 1].
//
// Accepted literals:
//   "#rrggbb"  (CSS hex, what panel color pickers produce)
//   0xRRGGBB   (integer hex, via `Color::hex`)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

//=== ColorParseError =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color {0:?} must start with '#'")]
    MissingHash(String),

    #[error("color {0:?} must have exactly six hex digits")]
    BadLength(String),

    #[error("color {0:?} contains a non-hex digit")]
    BadDigit(String),
}

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from `0xRRGGBB`. Bits above the low 24 are ignored.
    pub fn hex(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Parses `#rrggbb` (case-insensitive).
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let digits = text
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(text.to_string()))?;

        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(text.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::BadDigit(text.to_string()))?;

        Ok(Self::hex(value))
    }

    /// Packs back into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// `#rrggbb` string, lowercase.
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// Linear interpolation toward `other`; `t` is not clamped.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    //--- HSL --------------------------------------------------------------

    /// Hue, saturation and lightness, each in [0, 1].
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;
        if delta <= f32::EPSILON {
            return (0.0, 0.0, lightness);
        }

        let saturation = if lightness > 0.5 { delta / (2.0 - max - min) } else { delta / (max + min) };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (hue / 6.0, saturation, lightness)
    }

    /// Inverse of [`Color::to_hsl`]; hue wraps.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        if saturation <= 0.0 {
            return Self::rgb(lightness, lightness, lightness);
        }
        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;
        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Self::rgb(channel(hue + 1.0 / 3.0), channel(hue), channel(hue - 1.0 / 3.0))
    }

    /// Rotates the hue by `turns` of the color wheel. Greys are unchanged.
    pub fn rotate_hue(self, turns: f32) -> Self {
        let (hue, saturation, lightness) = self.to_hsl();
        Self::from_hsl(hue + turns, saturation, lightness)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn parses_css_hex() {
        let c = Color::parse("#ff8000").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 128.0 / 255.0));
        assert!(close(c.b, 0.0));
        assert_eq!(Color::parse("#BA001F").unwrap().to_hex(), 0xba001f);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(matches!(Color::parse("ff0000"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(Color::parse("#fff"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(Color::parse("#gg0000"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn hex_round_trips_through_string() {
        let c = Color::hex(0x4963cd);
        assert_eq!(c.to_hex_string(), "#4963cd");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let inside = Color::parse("#f74008").unwrap();
        let outside = Color::parse("#4950bc").unwrap();

        assert_eq!(inside.lerp(outside, 0.0), inside);
        assert_eq!(inside.lerp(outside, 1.0).to_hex(), outside.to_hex());

        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!(close(mid.g, 0.5));
    }

    #[test]
    fn hue_rotation_walks_the_wheel() {
        let green = Color::RED.rotate_hue(1.0 / 3.0);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let back = Color::hex(0xfa0000).rotate_hue(0.25).rotate_hue(-0.25);
        assert_eq!(back.to_hex(), 0xfa0000);

        let grey = Color::rgb(0.4, 0.4, 0.4);
        assert_eq!(grey.rotate_hue(0.5), grey);
    }

    #[test]
    fn hsl_round_trips_galaxy_colors() {
        for hex in [0xf74008, 0x4950bc, 0x94a3f0] {
            let (h, s, l) = Color::hex(hex).to_hsl();
            assert_eq!(Color::from_hsl(h, s, l).to_hex(), hex);
        }
    }

    #[test]
    fn deserializes_from_toml_string() {
        #[derive(Deserialize)]
        struct Doc {
            color: Color,
        }

        let doc: Doc = toml::from_str("color = \"#94a3f0\"").unwrap();
        assert_eq!(doc.color.to_hex(), 0x94a3f0);

        let bad: Result<Doc, _> = toml::from_str("color = \"blue\"");
        assert!(bad.is_err());
    }
}
