//! Color space conversions: hex ↔ RGB ↔ HSL.
//!
//! Every palette computation starts from a hex string typed by a user or
//! produced by a color picker. This module owns the canonical form of those
//! strings and the numeric conversions the generator runs on.
//!
//! # Canonical hex
//!
//! The canonical representation is `#rrggbb`, lower-cased. Three-digit
//! shorthand (`#f0c`) is expanded by [`normalize_hex`] before any lookup so
//! that `#FFF`, `#fff` and `#ffffff` share a cache key. [`hex_to_rgb`] itself
//! accepts only the six-digit form and rejects anything else rather than
//! guessing.
//!
//! # HSL
//!
//! [`rgb_to_hsl`] uses the min/max-channel formula. Achromatic input
//! (`max == min`) yields `h = 0, s = 0` exactly, and [`hsl_to_rgb`]
//! short-circuits `s == 0` to a single gray channel value. Intermediate math is
//! `f64`; rounding happens only at the RGB boundary.
//!
//! ```rust
//! use huekit_palette::{hex_to_rgb, hsl_to_rgb, rgb_to_hsl, Rgb};
//!
//! let rgb = hex_to_rgb("#d946ef").unwrap();
//! assert_eq!(rgb, Rgb(217, 70, 239));
//! assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

// ─── Types ──────────────────────────────────────────────────────────────────

/// An sRGB color triplet, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Formats as canonical `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// Formats as the space-separated CSS function `rgb(r g b)`.
    ///
    /// This is the exact textual form written into generated stylesheets.
    pub fn to_css(self) -> String {
        format!("rgb({} {} {})", self.0, self.1, self.2)
    }

    /// Returns the channels as a tuple.
    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }
}

/// A color in HSL: hue in degrees `[0, 360)`, saturation and lightness in
/// percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

/// Light or dark rendering of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Light, ColorScheme::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Hex ────────────────────────────────────────────────────────────────────

/// Lower-cases a hex color and expands `#rgb` shorthand to `#rrggbb`.
///
/// Input that is not shorthand is only lower-cased; validation is left to
/// [`hex_to_rgb`].
///
/// ```rust
/// use huekit_palette::normalize_hex;
///
/// assert_eq!(normalize_hex("#F0c"), "#ff00cc");
/// assert_eq!(normalize_hex("#D946EF"), "#d946ef");
/// ```
pub fn normalize_hex(hex: &str) -> String {
    let bytes = hex.as_bytes();
    if bytes.len() == 4 && bytes[0] == b'#' && hex.is_ascii() {
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in hex[1..].chars() {
            let c = c.to_ascii_lowercase();
            out.push(c);
            out.push(c);
        }
        return out;
    }
    hex.to_lowercase()
}

/// Parses a six-digit hex color, with or without a leading `#`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidFormat`] for any other length or for
/// non-hex characters. Shorthand must go through [`normalize_hex`] first.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::InvalidFormat(hex.to_string()))
    };

    Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats an RGB triplet as canonical lower-case `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
}

/// Reads an `rgb(r g b)` (or comma-separated `rgb(r, g, b)`) value.
///
/// The first three integer runs are taken as channels, which is enough for
/// the stops this crate generates.
///
/// # Errors
///
/// Returns [`ColorError::InvalidRgbFunction`] when fewer than three integers
/// are present or a channel exceeds 255.
pub fn parse_rgb_function(value: &str) -> Result<Rgb, ColorError> {
    let err = || ColorError::InvalidRgbFunction(value.to_string());

    let mut channels = [0u8; 3];
    let mut found = 0;
    for run in value
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .take(3)
    {
        channels[found] = run.parse::<u8>().map_err(|_| err())?;
        found += 1;
    }

    if found < 3 {
        return Err(err());
    }
    Ok(Rgb(channels[0], channels[1], channels[2]))
}

// ─── HSL ────────────────────────────────────────────────────────────────────

/// Converts RGB to HSL.
///
/// Achromatic colors (all channels equal) return `h = 0` and `s = 0`.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.0 as f64 / 255.0;
    let g = rgb.1 as f64 / 255.0;
    let b = rgb.2 as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(h / 6.0 * 360.0, s * 100.0, l * 100.0)
}

/// Converts HSL back to RGB, rounding each channel.
///
/// Zero saturation short-circuits to gray `round(l * 255)`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        let gray = to_channel(l);
        return Rgb(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
