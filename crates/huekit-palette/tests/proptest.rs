//! Property-based tests for the palette engine using proptest.

use huekit_palette::{
    contrast_ratio, generate_palette, hex_to_rgb, interaction_color, next_darker, rgb_to_hsl,
    shade_targets, CachePolicy, ContrastChoice, ContrastReport, Hsl, InteractionResolver, Rgb,
    Shade,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb(r, g, b))
}

/// Base colors whose lightness sits inside every stop's clamp window.
fn mid_lightness_hsl() -> impl Strategy<Value = Hsl> {
    (0.0f64..360.0, 10.0f64..100.0, 20.0f64..70.0).prop_map(|(h, s, l)| Hsl::new(h, s, l))
}

fn channel_drift(a: Rgb, b: Rgb) -> u8 {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1)).max(a.2.abs_diff(b.2))
}

// ============================================================================
// Conversion
// ============================================================================

proptest! {
    /// Formatting and re-parsing a color is lossless.
    #[test]
    fn hex_round_trip(rgb in rgb_strategy()) {
        let hex = rgb.to_hex();
        prop_assert_eq!(hex_to_rgb(&hex), Ok(rgb));
        prop_assert_eq!(hex.to_lowercase(), hex);
    }

    /// Upper-case input parses to the same color.
    #[test]
    fn hex_parse_ignores_case(rgb in rgb_strategy()) {
        let upper = rgb.to_hex().to_uppercase();
        prop_assert_eq!(hex_to_rgb(&upper), Ok(rgb));
    }
}

// ============================================================================
// Palette generation
// ============================================================================

proptest! {
    /// Stop 500 reproduces the seed up to one unit of rounding per channel.
    #[test]
    fn shade_500_is_the_seed(rgb in rgb_strategy()) {
        let scale = generate_palette(&rgb.to_hex());
        prop_assert_eq!(scale.len(), 11);
        let base = scale.get(Shade::S500).unwrap();
        prop_assert!(channel_drift(base, rgb) <= 1, "{:?} vs {:?}", base, rgb);
    }

    /// Lightness strictly decreases from 50 to 950.
    #[test]
    fn lightness_decreases_with_key(base in mid_lightness_hsl()) {
        let targets = shade_targets(base);
        for pair in targets.windows(2) {
            let (lighter, darker) = (pair[0].1.l, pair[1].1.l);
            prop_assert!(lighter > darker, "{:?} then {:?}", pair[0], pair[1]);
        }
    }

    /// Every stop keeps the base hue.
    #[test]
    fn hue_is_invariant(base in mid_lightness_hsl()) {
        for (_, hsl) in shade_targets(base) {
            prop_assert_eq!(hsl.h, base.h);
        }
    }

    /// Saturation and lightness of every stop stay in [0, 100].
    #[test]
    fn targets_stay_in_range(rgb in rgb_strategy()) {
        for (_, hsl) in shade_targets(rgb_to_hsl(rgb)) {
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&hsl.s));
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&hsl.l));
        }
    }

    /// Reversal moves key k to 1000 - k and is its own inverse.
    #[test]
    fn reversal_mirrors_keys(rgb in rgb_strategy()) {
        let scale = generate_palette(&rgb.to_hex());
        let reversed = scale.reversed();
        for shade in Shade::ALL {
            prop_assert_eq!(reversed.get(shade.reversed()), scale.get(shade));
        }
        prop_assert_eq!(reversed.reversed(), scale);
    }
}

// ============================================================================
// Contrast and interaction
// ============================================================================

proptest! {
    /// Ratios against white and black multiply to 21, so one is always >= 4.58.
    #[test]
    fn contrast_pair_is_complementary(rgb in rgb_strategy()) {
        let report = ContrastReport::for_color(&rgb.to_hex());
        prop_assert!(report.white >= 1.0 && report.black >= 1.0);
        prop_assert!((report.white * report.black - 21.0).abs() < 1e-9);
        prop_assert!(report.white.max(report.black) >= 21f64.sqrt() - 1e-9);
        prop_assert_eq!(report.ratio(report.recommended()), report.white.max(report.black));
    }

    /// Contrast stays within [1, 21].
    #[test]
    fn contrast_is_bounded(rgb in rgb_strategy(), black in any::<bool>()) {
        let choice = if black { ContrastChoice::Black } else { ContrastChoice::White };
        let ratio = contrast_ratio(&rgb.to_hex(), choice);
        prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
    }

    /// The interaction color is the seed itself or one of its stops.
    #[test]
    fn interaction_comes_from_the_scale(rgb in rgb_strategy()) {
        let seed = rgb.to_hex();
        let result = interaction_color(&seed);
        let scale = generate_palette(&seed);
        prop_assert!(
            result == seed || scale.iter().any(|(_, stop)| stop.to_hex() == result),
            "{} -> {}", seed, result
        );
    }

    /// The interaction color is the stop right after the seed's first match,
    /// and the seed itself when it is missing from its scale or is the last
    /// stop. The cached resolver agrees.
    #[test]
    fn interaction_falls_back_to_seed(rgb in rgb_strategy()) {
        let seed = rgb.to_hex();
        let hexes: Vec<String> = generate_palette(&seed)
            .iter()
            .map(|(_, stop)| stop.to_hex())
            .collect();

        let expected = match hexes.iter().position(|hex| *hex == seed) {
            Some(i) if i + 1 < hexes.len() => hexes[i + 1].clone(),
            _ => seed.clone(),
        };
        prop_assert_eq!(interaction_color(&seed), expected.clone());

        let mut resolver = InteractionResolver::new(CachePolicy::Session);
        prop_assert_eq!(resolver.resolve(&seed), expected);
    }

    /// Unparseable seeds come back untouched, not normalized.
    #[test]
    fn invalid_seed_is_returned_verbatim(seed in "[g-zG-Z]{1,8}") {
        prop_assert_eq!(interaction_color(&seed), seed.clone());

        let mut resolver = InteractionResolver::default();
        prop_assert_eq!(resolver.resolve(&seed), seed.clone());
        prop_assert!(resolver.scale(&seed).is_empty());
    }
}

// ============================================================================
// Interaction fallbacks
// ============================================================================

#[test]
fn darkest_stop_has_no_interaction() {
    let scale = generate_palette("#d946ef");
    let darkest = scale.get(Shade::S950).unwrap().to_hex();
    assert_eq!(next_darker(&scale, &darkest), None);
    assert_eq!(
        next_darker(&scale, &scale.get(Shade::S900).unwrap().to_hex()),
        Some(darkest)
    );
}

#[test]
fn malformed_hex_falls_back_in_both_paths() {
    let mut resolver = InteractionResolver::new(CachePolicy::from_capacity(4));
    for seed in ["#12345", "nope", "#GGGGGG", ""] {
        assert_eq!(interaction_color(seed), seed);
        assert_eq!(resolver.resolve(seed), seed);
    }
}
