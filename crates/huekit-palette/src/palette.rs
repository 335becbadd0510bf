//! Tint/shade scale generation from a single base color.
//!
//! A [`ShadeScale`] maps the eleven fixed keys `50, 100, … 900, 950` to
//! concrete colors. The base color always sits at `500`; lighter keys raise
//! lightness (and mostly lower saturation) toward a 95% ceiling, darker keys
//! lower lightness and raise saturation toward a 4% floor. Hue never changes.
//!
//! The per-step adjustments are a hand-tuned constant ([`SHADE_OFFSETS`]), not
//! a formula. Each adjustment is clamped, so near-white or near-black seeds
//! collapse adjacent stops onto the clamp boundary instead of leaving the
//! valid range.
//!
//! ```rust
//! use huekit_palette::{generate_palette, Shade};
//!
//! let scale = generate_palette("#d946ef");
//! assert_eq!(scale.len(), 11);
//! assert_eq!(scale.css_value(Shade::S500).as_deref(), Some("rgb(217 70 239)"));
//!
//! // Unparseable input yields no palette at all.
//! assert!(generate_palette("not-a-color").is_empty());
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::color::{hex_to_rgb, hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};

// ─── Shade keys ─────────────────────────────────────────────────────────────

/// One of the eleven fixed stops of a shade scale, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl Shade {
    /// All stops in ascending key order.
    pub const ALL: [Shade; 11] = [
        Shade::S50,
        Shade::S100,
        Shade::S200,
        Shade::S300,
        Shade::S400,
        Shade::S500,
        Shade::S600,
        Shade::S700,
        Shade::S800,
        Shade::S900,
        Shade::S950,
    ];

    /// The numeric key used in CSS variable names.
    pub fn value(self) -> u16 {
        match self {
            Shade::S50 => 50,
            Shade::S100 => 100,
            Shade::S200 => 200,
            Shade::S300 => 300,
            Shade::S400 => 400,
            Shade::S500 => 500,
            Shade::S600 => 600,
            Shade::S700 => 700,
            Shade::S800 => 800,
            Shade::S900 => 900,
            Shade::S950 => 950,
        }
    }

    /// Looks up a stop by its numeric key.
    pub fn from_value(value: u16) -> Option<Shade> {
        Shade::ALL.into_iter().find(|s| s.value() == value)
    }

    /// The stop at `1000 - key`: `50 ↔ 950`, `100 ↔ 900`, `500` stays.
    pub fn reversed(self) -> Shade {
        Shade::ALL[Shade::ALL.len() - 1 - self.index()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Shade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ─── Offset table ───────────────────────────────────────────────────────────

/// A clamped adjustment of one HSL component, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjust {
    /// Leave the component unchanged.
    Keep,
    /// `min(v + by, ceiling)`
    Raise { by: f64, ceiling: f64 },
    /// `max(v - by, floor)`
    Lower { by: f64, floor: f64 },
}

impl Adjust {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Adjust::Keep => v,
            Adjust::Raise { by, ceiling } => (v + by).min(ceiling),
            Adjust::Lower { by, floor } => (v - by).max(floor),
        }
    }
}

/// Saturation and lightness adjustments for one stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeOffset {
    pub shade: Shade,
    pub saturation: Adjust,
    pub lightness: Adjust,
}

const fn offset(shade: Shade, saturation: Adjust, lightness: Adjust) -> ShadeOffset {
    ShadeOffset {
        shade,
        saturation,
        lightness,
    }
}

const fn raise(by: f64, ceiling: f64) -> Adjust {
    Adjust::Raise { by, ceiling }
}

const fn lower(by: f64, floor: f64) -> Adjust {
    Adjust::Lower { by, floor }
}

/// The empirically tuned offsets applied to the base color's HSL for each stop.
pub const SHADE_OFFSETS: [ShadeOffset; 11] = [
    offset(Shade::S50, lower(20.0, 10.0), raise(45.0, 95.0)),
    offset(Shade::S100, lower(10.0, 15.0), raise(35.0, 90.0)),
    offset(Shade::S200, Adjust::Keep, raise(25.0, 85.0)),
    offset(Shade::S300, Adjust::Keep, raise(15.0, 80.0)),
    offset(Shade::S400, Adjust::Keep, raise(5.0, 75.0)),
    offset(Shade::S500, Adjust::Keep, Adjust::Keep),
    offset(Shade::S600, raise(5.0, 100.0), lower(10.0, 15.0)),
    offset(Shade::S700, raise(10.0, 100.0), lower(20.0, 10.0)),
    offset(Shade::S800, raise(15.0, 100.0), lower(30.0, 8.0)),
    offset(Shade::S900, raise(20.0, 100.0), lower(40.0, 6.0)),
    offset(Shade::S950, raise(25.0, 100.0), lower(50.0, 4.0)),
];

/// Computes the HSL target of every stop for a base color, before rounding to
/// RGB. Hue is copied unchanged into every entry.
pub fn shade_targets(base: Hsl) -> [(Shade, Hsl); 11] {
    SHADE_OFFSETS.map(|o| {
        (
            o.shade,
            Hsl::new(base.h, o.saturation.apply(base.s), o.lightness.apply(base.l)),
        )
    })
}

// ─── ShadeScale ─────────────────────────────────────────────────────────────

/// An ordered set of generated stops, lightest key first.
///
/// A scale is either complete (all eleven stops) or empty, which callers treat
/// as "no palette available".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadeScale {
    stops: Vec<(Shade, Rgb)>,
}

impl ShadeScale {
    /// An empty scale.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a scale from an HSL base color.
    pub fn from_hsl(base: Hsl) -> Self {
        let stops = shade_targets(base)
            .into_iter()
            .map(|(shade, hsl)| (shade, hsl_to_rgb(hsl)))
            .collect();
        Self { stops }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn get(&self, shade: Shade) -> Option<Rgb> {
        self.stops
            .iter()
            .find(|(s, _)| *s == shade)
            .map(|(_, rgb)| *rgb)
    }

    /// The stop formatted as `rgb(r g b)`.
    pub fn css_value(&self, shade: Shade) -> Option<String> {
        self.get(shade).map(Rgb::to_css)
    }

    /// Iterates stops in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (Shade, Rgb)> + '_ {
        self.stops.iter().copied()
    }

    /// Remaps every key `k` to `1000 - k`, keeping ascending key order.
    ///
    /// The reversed scale of a light-authored palette is what the dark-mode
    /// block emits: the darkest color lands on `50`.
    pub fn reversed(&self) -> ShadeScale {
        let mut stops: Vec<(Shade, Rgb)> = self
            .stops
            .iter()
            .map(|(shade, rgb)| (shade.reversed(), *rgb))
            .collect();
        stops.sort_by_key(|(shade, _)| *shade);
        ShadeScale { stops }
    }
}

impl Serialize for ShadeScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stops.len()))?;
        for (shade, rgb) in &self.stops {
            map.serialize_entry(&shade.value().to_string(), &rgb.to_css())?;
        }
        map.end()
    }
}

/// Generates the shade scale for a six-digit hex base color.
///
/// Returns an empty scale when `base` does not parse; this is the soft
/// failure path, not an error.
pub fn generate_palette(base: &str) -> ShadeScale {
    match hex_to_rgb(base) {
        Ok(rgb) => ShadeScale::from_hsl(rgb_to_hsl(rgb)),
        Err(err) => {
            tracing::debug!(%err, "no palette for base color");
            ShadeScale::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Shade keys
    // =====================================================================

    #[test]
    fn shade_values_ascend() {
        let values: Vec<u16> = Shade::ALL.iter().map(|s| s.value()).collect();
        assert_eq!(
            values,
            vec![50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]
        );
    }

    #[test]
    fn shade_reversal_sums_to_thousand() {
        for shade in Shade::ALL {
            assert_eq!(shade.value() + shade.reversed().value(), 1000);
        }
        assert_eq!(Shade::S500.reversed(), Shade::S500);
    }

    #[test]
    fn shade_from_value() {
        assert_eq!(Shade::from_value(950), Some(Shade::S950));
        assert_eq!(Shade::from_value(550), None);
    }

    // =====================================================================
    // Offset table
    // =====================================================================

    #[test]
    fn adjust_clamps() {
        assert_eq!(raise(45.0, 95.0).apply(60.0), 95.0);
        assert_eq!(raise(5.0, 75.0).apply(10.0), 15.0);
        assert_eq!(lower(50.0, 4.0).apply(20.0), 4.0);
        assert_eq!(lower(20.0, 10.0).apply(0.0), 10.0);
        assert_eq!(Adjust::Keep.apply(33.3), 33.3);
    }

    #[test]
    fn targets_for_mid_color() {
        let targets = shade_targets(Hsl::new(200.0, 50.0, 50.0));
        let lightness: Vec<f64> = targets.iter().map(|(_, hsl)| hsl.l).collect();
        assert_eq!(
            lightness,
            vec![95.0, 85.0, 75.0, 65.0, 55.0, 50.0, 40.0, 30.0, 20.0, 10.0, 4.0]
        );
        let saturation: Vec<f64> = targets.iter().map(|(_, hsl)| hsl.s).collect();
        assert_eq!(
            saturation,
            vec![30.0, 40.0, 50.0, 50.0, 50.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0]
        );
        assert!(targets.iter().all(|(_, hsl)| hsl.h == 200.0));
    }

    #[test]
    fn targets_base_is_untouched() {
        let base = Hsl::new(292.19, 84.08, 60.59);
        let (_, hsl) = shade_targets(base)[5];
        assert_eq!(hsl, base);
    }

    // =====================================================================
    // generate_palette
    // =====================================================================

    #[test]
    fn fuchsia_scale() {
        let scale = generate_palette("#d946ef");
        assert_eq!(scale.len(), 11);
        assert_eq!(scale.get(Shade::S500), Some(Rgb(217, 70, 239)));
        // 950: lightness 10.59, saturation capped at 100.
        let darkest = scale.get(Shade::S950).unwrap();
        assert!(darkest.2 > darkest.0 && darkest.0 > darkest.1);
    }

    #[test]
    fn accepts_hex_without_hash() {
        assert_eq!(generate_palette("d946ef"), generate_palette("#d946ef"));
    }

    #[test]
    fn malformed_input_is_empty() {
        assert!(generate_palette("not-a-color").is_empty());
        assert!(generate_palette("#fff").is_empty());
        assert!(generate_palette("").is_empty());
    }

    #[test]
    fn white_seed_clamps_light_stops() {
        let scale = generate_palette("#ffffff");
        assert_eq!(scale.get(Shade::S500), Some(Rgb::WHITE));
        // Ceilings pull every lighter stop below the seed.
        assert_ne!(scale.get(Shade::S50), Some(Rgb::WHITE));
    }

    #[test]
    fn reversed_scale_swaps_extremes() {
        let scale = generate_palette("#06b6d4");
        let reversed = scale.reversed();
        assert_eq!(reversed.get(Shade::S50), scale.get(Shade::S950));
        assert_eq!(reversed.get(Shade::S950), scale.get(Shade::S50));
        assert_eq!(reversed.get(Shade::S500), scale.get(Shade::S500));
        let keys: Vec<Shade> = reversed.iter().map(|(s, _)| s).collect();
        assert_eq!(keys, Shade::ALL.to_vec());
    }

    #[test]
    fn reversed_empty_is_empty() {
        assert!(ShadeScale::empty().reversed().is_empty());
    }

    #[test]
    fn serializes_as_key_map() {
        let scale = generate_palette("#d946ef");
        let json = serde_json::to_value(&scale).unwrap();
        assert_eq!(json["500"], "rgb(217 70 239)");
        assert_eq!(json.as_object().unwrap().len(), 11);
    }
}
