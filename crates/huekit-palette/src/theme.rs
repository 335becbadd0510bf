//! Theme palettes and the theme CSS compiler.
//!
//! A theme has two palettes, *primary* and *accent*, each with a light and a
//! dark [`PaletteState`]. [`compile_theme_css`] turns them into two CSS rules:
//!
//! ```css
//! /* theme-ocean theme */
//! .theme-ocean {
//!   --color-theme-primary-50: rgb(…);
//!   …
//!   --color-theme-primary: var(--color-theme-primary-500);
//!   --color-theme-primary-interaction: var(--color-theme-primary-600);
//!   --color-theme-primary-contrast: var(--color-gray-0);
//!   …accent…
//! }
//! /* theme-ocean theme dark */
//! .theme-ocean.dark { …reversed scales… }
//! ```
//!
//! # Dark mode
//!
//! The dark rule re-emits each scale with key `k` moved to `1000 - k`, so the
//! darkest generated color becomes `50` and the lightest becomes `950`. A
//! light-authored palette thereby works as a dark palette without a second
//! tuning pass. With `use_separate_dark_mode` the dark scales are generated
//! from the dark defaults instead of the light ones; they are reversed all the
//! same.
//!
//! # Accent tracking
//!
//! Without `use_separate_accent` the light accent variables repeat the
//! primary scale. The dark rule follows the same rule unless
//! `use_separate_dark_mode` is set, in which case the dark accent comes from
//! the accent's own dark default.
//!
//! # Malformed colors
//!
//! The compiler never fails. A seed that does not parse contributes an empty
//! scale: its shade lines are missing while the alias and contrast lines are
//! still written. [`compile_theme_css_strict`] rejects such input instead.

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, normalize_hex, ColorScheme};
use crate::contrast::ContrastChoice;
use crate::error::{PaletteRole, ThemeError};
use crate::palette::{generate_palette, ShadeScale};

/// Placeholder class name shown while a theme has no name yet.
pub const PLACEHOLDER_CLASS_NAME: &str = "[your-theme-name]";

// ─── Palettes ───────────────────────────────────────────────────────────────

/// The colors of one palette in one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteState {
    /// The user-chosen base color.
    #[serde(rename = "DEFAULT")]
    pub default: String,
    /// Derived hover/active color; never edited directly.
    pub interaction: String,
    /// Text color drawn on top of `default`.
    pub contrast: ContrastChoice,
}

impl PaletteState {
    pub fn new(
        default: impl Into<String>,
        interaction: impl Into<String>,
        contrast: ContrastChoice,
    ) -> Self {
        Self {
            default: default.into(),
            interaction: interaction.into(),
            contrast,
        }
    }
}

/// Light and dark states of a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub light: PaletteState,
    pub dark: PaletteState,
}

impl ThemePalette {
    /// A palette whose dark state equals its light state.
    pub fn uniform(state: PaletteState) -> Self {
        Self {
            dark: state.clone(),
            light: state,
        }
    }

    pub fn get(&self, scheme: ColorScheme) -> &PaletteState {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    pub fn get_mut(&mut self, scheme: ColorScheme) -> &mut PaletteState {
        match scheme {
            ColorScheme::Light => &mut self.light,
            ColorScheme::Dark => &mut self.dark,
        }
    }
}

// ─── Compiler input ─────────────────────────────────────────────────────────

/// Everything the compiler needs, with dark/accent forcing already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    pub class_name: String,
    pub primary: ThemePalette,
    pub accent: ThemePalette,
    pub use_separate_accent: bool,
    pub use_separate_dark_mode: bool,
}

/// The four scales a theme compiles to, before reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeScales {
    pub light_primary: ShadeScale,
    pub light_accent: ShadeScale,
    pub dark_primary: ShadeScale,
    pub dark_accent: ShadeScale,
}

impl ThemeScales {
    /// Generates the scales. Light accent tracks light primary unless
    /// `use_separate_accent`; with `use_separate_dark_mode` both dark scales
    /// come from the dark seeds, otherwise they reuse the light scales.
    pub fn generate(theme: &ThemeInput) -> Self {
        let scale = |state: &PaletteState| generate_palette(&normalize_hex(&state.default));

        let light_primary = scale(&theme.primary.light);
        let light_accent = if theme.use_separate_accent {
            scale(&theme.accent.light)
        } else {
            light_primary.clone()
        };

        let (dark_primary, dark_accent) = if theme.use_separate_dark_mode {
            (scale(&theme.primary.dark), scale(&theme.accent.dark))
        } else {
            (light_primary.clone(), light_accent.clone())
        };

        Self {
            light_primary,
            light_accent,
            dark_primary,
            dark_accent,
        }
    }

    /// The scales as emitted for `scheme`: dark scales come back reversed.
    pub fn emitted(&self, scheme: ColorScheme) -> (ShadeScale, ShadeScale) {
        match scheme {
            ColorScheme::Light => (self.light_primary.clone(), self.light_accent.clone()),
            ColorScheme::Dark => (self.dark_primary.reversed(), self.dark_accent.reversed()),
        }
    }
}

// ─── Compiler ───────────────────────────────────────────────────────────────

/// Compiles a theme into its light and dark CSS rules.
///
/// The output is deterministic for identical input and contains nothing
/// time- or randomness-dependent, so recompiling is always safe.
pub fn compile_theme_css(theme: &ThemeInput) -> String {
    let scales = ThemeScales::generate(theme);
    let class = &theme.class_name;
    let mut css = String::new();

    for scheme in ColorScheme::ALL {
        let (primary, accent) = scales.emitted(scheme);
        let (selector, title) = match scheme {
            ColorScheme::Light => (format!(".{}", class), format!("{} theme", class)),
            ColorScheme::Dark => (format!(".{}.dark", class), format!("{} theme dark", class)),
        };

        css.push_str(&format!("/* {} */\n{} {{\n", title, selector));
        write_palette(
            &mut css,
            PaletteRole::Primary,
            &primary,
            theme.primary.get(scheme).contrast,
            scheme,
        );
        css.push('\n');
        write_palette(
            &mut css,
            PaletteRole::Accent,
            &accent,
            theme.accent.get(scheme).contrast,
            scheme,
        );
        css.push_str("}\n");
    }

    tracing::debug!(class = %class, bytes = css.len(), "compiled theme css");
    css
}

/// Like [`compile_theme_css`], but rejects input that would degrade.
///
/// Only seeds that feed the output are checked: the light accent seed only
/// with `use_separate_accent`, the dark seeds only with
/// `use_separate_dark_mode`.
///
/// # Errors
///
/// [`ThemeError::InvalidClassName`] for a class that is not a CSS identifier,
/// [`ThemeError::InvalidColor`] for the first seed that does not parse.
pub fn compile_theme_css_strict(theme: &ThemeInput) -> Result<String, ThemeError> {
    validate_class_name(&theme.class_name)?;

    let mut seeds = vec![(PaletteRole::Primary, ColorScheme::Light)];
    if theme.use_separate_accent {
        seeds.push((PaletteRole::Accent, ColorScheme::Light));
    }
    if theme.use_separate_dark_mode {
        seeds.push((PaletteRole::Primary, ColorScheme::Dark));
        seeds.push((PaletteRole::Accent, ColorScheme::Dark));
    }

    for (role, scheme) in seeds {
        let palette = match role {
            PaletteRole::Primary => &theme.primary,
            PaletteRole::Accent => &theme.accent,
        };
        hex_to_rgb(&normalize_hex(&palette.get(scheme).default)).map_err(|source| {
            ThemeError::InvalidColor {
                role,
                scheme,
                source,
            }
        })?;
    }

    Ok(compile_theme_css(theme))
}

/// Checks that `name` can be used in a `.name` class selector.
pub fn validate_class_name(name: &str) -> Result<(), ThemeError> {
    let invalid = || ThemeError::InvalidClassName(name.to_string());

    let mut chars = name.chars();
    let first = chars.next().ok_or_else(invalid)?;
    let starts_ok = first.is_ascii_alphabetic()
        || first == '_'
        || (first == '-'
            && chars
                .clone()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_'));
    if !starts_ok {
        return Err(invalid());
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(invalid());
    }
    Ok(())
}

fn write_palette(
    css: &mut String,
    role: PaletteRole,
    scale: &ShadeScale,
    contrast: ContrastChoice,
    scheme: ColorScheme,
) {
    let role = role.as_str();
    for (shade, rgb) in scale.iter() {
        css.push_str(&format!(
            "  --color-theme-{}-{}: {};\n",
            role,
            shade,
            rgb.to_css()
        ));
    }

    let heading = match scheme {
        ColorScheme::Light => "default",
        ColorScheme::Dark => "override light mode",
    };
    css.push_str(&format!(
        "  /* {} {}, interaction, contrast */\n",
        heading, role
    ));
    css.push_str(&format!(
        "  --color-theme-{0}: var(--color-theme-{0}-500);\n",
        role
    ));
    css.push_str(&format!(
        "  --color-theme-{0}-interaction: var(--color-theme-{0}-600);\n",
        role
    ));
    css.push_str(&format!(
        "  --color-theme-{}-contrast: var({});\n",
        role,
        contrast.neutral_token(scheme)
    ));
}
