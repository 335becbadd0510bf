//! Error types for color parsing, theme validation and stylesheet reading.
//!
//! The lenient entry points of this crate ([`generate_palette`](crate::generate_palette),
//! [`contrast_ratio`](crate::contrast_ratio), [`compile_theme_css`](crate::compile_theme_css))
//! never return these: they degrade to an empty palette, the ratio `1.0`, or
//! partial CSS. The errors surface only through the parsing primitives and the
//! strict compiler.

use thiserror::Error;

use crate::color::ColorScheme;

/// Errors produced when reading a color value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is not a 6-digit hex color (with or without `#`).
    #[error("invalid color format: '{0}' (expected #rrggbb)")]
    InvalidFormat(String),

    /// The value is not an `rgb(r g b)` function with three 0-255 channels.
    #[error("invalid rgb() value: '{0}'")]
    InvalidRgbFunction(String),
}

/// Which of the two palettes a theme input refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteRole {
    Primary,
    Accent,
}

impl PaletteRole {
    /// The CSS variable segment for this role (`primary` / `accent`).
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteRole::Primary => "primary",
            PaletteRole::Accent => "accent",
        }
    }
}

impl std::fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by [`compile_theme_css_strict`](crate::compile_theme_css_strict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A seed color that feeds the compiled output is not a valid hex color.
    #[error("{role} {scheme} color is invalid: {source}")]
    InvalidColor {
        role: PaletteRole,
        scheme: ColorScheme,
        #[source]
        source: ColorError,
    },

    /// The class name cannot be used as a CSS class selector.
    #[error("invalid theme class name: '{0}'")]
    InvalidClassName(String),
}

/// Errors produced while reading a compiled theme stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    /// The tokenizer rejected a rule.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },
}
