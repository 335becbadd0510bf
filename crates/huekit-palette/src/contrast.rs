//! WCAG contrast between a theme color and white or black text.
//!
//! The editor shows both ratios next to the two contrast options
//! (`White text (Contrast:4.2:1)`) so the author can pick the readable one.
//! This module only produces the numbers and labels.
//!
//! Luminance follows WCAG 2.x: each channel is linearized with the `0.03928`
//! threshold and combined with weights `0.2126 / 0.7152 / 0.0722`. The ratio is
//! `(L_lighter + 0.05) / (L_darker + 0.05)`, so it lies in `[1, 21]`.
//!
//! Against pure white and pure black the two ratios multiply to exactly 21,
//! which means one of them is always at least `√21 ≈ 4.58`.

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, ColorScheme, Rgb};

/// Ratio returned when the color cannot be parsed: "no contrast information".
pub const NO_CONTRAST: f64 = 1.0;

/// The two text colors a palette can pair with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastChoice {
    #[default]
    White,
    Black,
}

impl ContrastChoice {
    pub const ALL: [ContrastChoice; 2] = [ContrastChoice::White, ContrastChoice::Black];

    pub fn as_str(self) -> &'static str {
        match self {
            ContrastChoice::White => "white",
            ContrastChoice::Black => "black",
        }
    }

    /// The pure color this choice stands for.
    pub fn rgb(self) -> Rgb {
        match self {
            ContrastChoice::White => Rgb::WHITE,
            ContrastChoice::Black => Rgb::BLACK,
        }
    }

    /// The neutral design token the compiled CSS points at.
    ///
    /// The surrounding stylesheet inverts its gray ramp under `.dark`, so the
    /// lightest neutral is `--color-gray-0` in light mode and
    /// `--color-gray-1000` in dark mode.
    pub fn neutral_token(self, scheme: ColorScheme) -> &'static str {
        match (self, scheme) {
            (ContrastChoice::White, ColorScheme::Light)
            | (ContrastChoice::Black, ColorScheme::Dark) => "--color-gray-0",
            (ContrastChoice::White, ColorScheme::Dark)
            | (ContrastChoice::Black, ColorScheme::Light) => "--color-gray-1000",
        }
    }
}

impl std::fmt::Display for ContrastChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContrastChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(ContrastChoice::White),
            "black" => Ok(ContrastChoice::Black),
            other => Err(format!("unknown contrast '{}': expected white or black", other)),
        }
    }
}

/// Linearizes one sRGB channel (0–255) per WCAG.
fn linearize(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.0) + 0.7152 * linearize(rgb.1) + 0.0722 * linearize(rgb.2)
}

/// Contrast ratio between two RGB colors; symmetric and always `>= 1`.
pub fn contrast_between(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Contrast ratio of a hex color against white or black text.
///
/// Unparseable colors return [`NO_CONTRAST`].
pub fn contrast_ratio(color: &str, against: ContrastChoice) -> f64 {
    match hex_to_rgb(color) {
        Ok(rgb) => contrast_between(rgb, against.rgb()),
        Err(_) => NO_CONTRAST,
    }
}

/// Both contrast ratios of one color, as shown next to the contrast options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastReport {
    pub white: f64,
    pub black: f64,
}

impl ContrastReport {
    pub fn for_color(color: &str) -> Self {
        Self {
            white: contrast_ratio(color, ContrastChoice::White),
            black: contrast_ratio(color, ContrastChoice::Black),
        }
    }

    pub fn ratio(&self, choice: ContrastChoice) -> f64 {
        match choice {
            ContrastChoice::White => self.white,
            ContrastChoice::Black => self.black,
        }
    }

    /// The choice with the higher ratio; white wins ties.
    pub fn recommended(&self) -> ContrastChoice {
        if self.black > self.white {
            ContrastChoice::Black
        } else {
            ContrastChoice::White
        }
    }

    /// Option label, e.g. `White text (Contrast:4.2:1)`.
    pub fn label(&self, choice: ContrastChoice) -> String {
        let name = match choice {
            ContrastChoice::White => "White",
            ContrastChoice::Black => "Black",
        };
        format!("{} text (Contrast:{:.1}:1)", name, self.ratio(choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // =====================================================================
    // Luminance
    // =====================================================================

    #[test]
    fn luminance_extremes() {
        assert!(approx(relative_luminance(Rgb::BLACK), 0.0, 1e-12));
        assert!(approx(relative_luminance(Rgb::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_primaries_use_weights() {
        assert!(approx(relative_luminance(Rgb(255, 0, 0)), 0.2126, 1e-9));
        assert!(approx(relative_luminance(Rgb(0, 255, 0)), 0.7152, 1e-9));
        assert!(approx(relative_luminance(Rgb(0, 0, 255)), 0.0722, 1e-9));
    }

    #[test]
    fn linearize_below_threshold_is_linear() {
        // 10/255 = 0.0392 <= 0.03928
        assert!(approx(linearize(10), 10.0 / 255.0 / 12.92, 1e-12));
    }

    // =====================================================================
    // Ratios
    // =====================================================================

    #[test]
    fn white_on_white_is_one() {
        assert_eq!(contrast_ratio("#ffffff", ContrastChoice::White), 1.0);
    }

    #[test]
    fn black_on_white_is_twenty_one() {
        assert!(approx(contrast_ratio("#000000", ContrastChoice::White), 21.0, 1e-9));
        assert!(approx(contrast_ratio("#ffffff", ContrastChoice::Black), 21.0, 1e-9));
    }

    #[test]
    fn unparseable_is_sentinel() {
        assert_eq!(contrast_ratio("nope", ContrastChoice::White), NO_CONTRAST);
        assert_eq!(contrast_ratio("#fff", ContrastChoice::Black), NO_CONTRAST);
    }

    #[test]
    fn fuchsia_prefers_black() {
        let report = ContrastReport::for_color("#d946ef");
        assert!(report.white >= 1.0 && report.black >= 1.0);
        assert!(approx(report.white * report.black, 21.0, 1e-9));
        assert_eq!(report.recommended(), ContrastChoice::Black);
    }

    #[test]
    fn labels_use_one_decimal() {
        let report = ContrastReport {
            white: 4.2345,
            black: 4.9591,
        };
        assert_eq!(report.label(ContrastChoice::White), "White text (Contrast:4.2:1)");
        assert_eq!(report.label(ContrastChoice::Black), "Black text (Contrast:5.0:1)");
    }

    // =====================================================================
    // Choice
    // =====================================================================

    #[test]
    fn neutral_tokens_invert_in_dark() {
        use ColorScheme::*;
        assert_eq!(ContrastChoice::White.neutral_token(Light), "--color-gray-0");
        assert_eq!(ContrastChoice::Black.neutral_token(Light), "--color-gray-1000");
        assert_eq!(ContrastChoice::White.neutral_token(Dark), "--color-gray-1000");
        assert_eq!(ContrastChoice::Black.neutral_token(Dark), "--color-gray-0");
    }

    #[test]
    fn choice_from_str() {
        assert_eq!("White".parse::<ContrastChoice>(), Ok(ContrastChoice::White));
        assert_eq!(" black ".parse::<ContrastChoice>(), Ok(ContrastChoice::Black));
        assert!("grey".parse::<ContrastChoice>().is_err());
    }

    #[test]
    fn choice_serde_is_lowercase() {
        let json = serde_json::to_string(&ContrastChoice::Black).unwrap();
        assert_eq!(json, "\"black\"");
    }
}
