//! Terminal color swatches.

use console::Style;
use huekit_palette::{ContrastChoice, Rgb};

/// Maps a color to the nearest xterm-256 index.
///
/// Picks whichever of the closest 6x6x6 cube entry (16-231) and the closest
/// gray ramp entry (232-255) is nearer in RGB space. Ties go to the cube.
pub fn rgb_to_ansi256(rgb: Rgb) -> u8 {
    let Rgb(r, g, b) = rgb;
    let (ri, gi, bi) = (nearest_level(r), nearest_level(g), nearest_level(b));
    let cube = Rgb(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);

    let mean = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
    let step = ((mean - 8.0) / 10.0).round().clamp(0.0, 23.0) as u8;
    let gray = 8 + 10 * step;

    if distance(rgb, cube) <= distance(rgb, Rgb(gray, gray, gray)) {
        16 + 36 * ri as u8 + 6 * gi as u8 + bi as u8
    } else {
        232 + step
    }
}

/// Channel values of the 6x6x6 cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_level(v: u8) -> usize {
    (0..CUBE_LEVELS.len())
        .min_by_key(|&i| CUBE_LEVELS[i].abs_diff(v))
        .unwrap_or(0)
}

fn distance(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| u32::from(x.abs_diff(y)).pow(2);
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

/// `text` on a `background` block, in `contrast` colored text.
///
/// Plain `text` when `colored` is false.
pub fn swatch(text: &str, background: Rgb, contrast: ContrastChoice, colored: bool) -> String {
    let style = Style::new()
        .on_color256(rgb_to_ansi256(background))
        .color256(rgb_to_ansi256(contrast.rgb()))
        .force_styling(colored);
    style.apply_to(format!(" {} ", text)).to_string()
}
