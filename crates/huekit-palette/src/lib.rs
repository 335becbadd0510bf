//! Huekit palette - shade scales, contrast and theme CSS from a single seed color.
//!
//! This crate is the pure engine behind the huekit theme editor. It provides:
//!
//! - Hex, RGB and HSL conversion
//! - An 11-stop shade scale (`50` to `950`) generated around a seed color
//! - WCAG contrast ratios against white and black text
//! - Interaction (hover/active) color derivation, with a memoizing cache
//! - A compiler from two palettes to light and dark CSS rules
//! - A reader that turns compiled CSS back into rules and declarations
//!
//! Nothing here does I/O. Persistence lives in `huekit-store`, the editor
//! session and CLI in `huekit`.
//!
//! # Quick Start
//!
//! ```rust
//! use huekit_palette::{
//!     compile_theme_css, generate_palette, interaction_color, ContrastChoice, PaletteState,
//!     Shade, ThemeInput, ThemePalette,
//! };
//!
//! let scale = generate_palette("#d946ef");
//! assert_eq!(scale.len(), 11);
//! assert_eq!(scale.get(Shade::S500).unwrap().to_hex(), "#d946ef");
//!
//! let hover = interaction_color("#d946ef");
//! let state = PaletteState::new("#d946ef", hover, ContrastChoice::Black);
//!
//! let css = compile_theme_css(&ThemeInput {
//!     class_name: "theme-orchid".to_string(),
//!     primary: ThemePalette::uniform(state.clone()),
//!     accent: ThemePalette::uniform(state),
//!     use_separate_accent: false,
//!     use_separate_dark_mode: false,
//! });
//! assert!(css.starts_with("/* theme-orchid theme */\n.theme-orchid {\n"));
//! assert!(css.contains(".theme-orchid.dark {"));
//! ```
//!
//! # Lenient and strict entry points
//!
//! | Operation | Bad input |
//! |-----------|-----------|
//! | [`generate_palette`] | empty scale |
//! | [`contrast_ratio`] | [`NO_CONTRAST`] (`1.0`) |
//! | [`interaction_color`] | the input, unchanged |
//! | [`compile_theme_css`] | CSS without the affected shade lines |
//! | [`compile_theme_css_strict`] | [`ThemeError`] |
//! | [`hex_to_rgb`], [`parse_theme_css`] | [`ColorError`], [`CssError`] |

mod cache;
mod color;
mod contrast;
mod error;
mod interaction;
mod palette;
mod stylesheet;
mod theme;

// Re-export public API
pub use cache::{CachePolicy, CacheStats, PaletteCache, DEFAULT_CAPACITY};
pub use color::{
    hex_to_rgb, hsl_to_rgb, normalize_hex, parse_rgb_function, rgb_to_hex, rgb_to_hsl,
    ColorScheme, Hsl, Rgb,
};
pub use contrast::{
    contrast_between, contrast_ratio, relative_luminance, ContrastChoice, ContrastReport,
    NO_CONTRAST,
};
pub use error::{ColorError, CssError, PaletteRole, ThemeError};
pub use interaction::{interaction_color, next_darker, InteractionResolver};
pub use palette::{
    generate_palette, shade_targets, Adjust, Shade, ShadeOffset, ShadeScale, SHADE_OFFSETS,
};
pub use stylesheet::{parse_theme_css, Declaration, ThemeRule, ThemeStylesheet};
pub use theme::{
    compile_theme_css, compile_theme_css_strict, validate_class_name, PaletteState, ThemeInput,
    ThemePalette, ThemeScales, PLACEHOLDER_CLASS_NAME,
};
