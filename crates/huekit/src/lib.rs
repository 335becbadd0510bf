//! # Huekit - Theme Editor and CLI
//!
//! Huekit ties the palette engine ([`huekit_palette`]) and the theme store
//! ([`huekit_store`]) together into an editing session and a command-line
//! tool.
//!
//! ## Core Concepts
//!
//! - [`ThemeEditor`]: form state of a theme being edited, with the derived
//!   rules that keep its palettes consistent
//! - [`Debouncer`]: holds back rapid input until it settles
//! - [`LoadGuard`]: loads a saved theme without triggering derived rules
//! - [`Config`]: YAML settings for the binary
//! - [`Cli`] / [`run`]: the `huekit` commands
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use chrono::Utc;
//! use huekit::ThemeEditor;
//! use huekit_palette::PaletteRole;
//! use huekit_store::{MemoryStore, ThemeRepository};
//!
//! let mut repo = ThemeRepository::new(MemoryStore::new());
//! let mut editor = ThemeEditor::new("docs");
//!
//! editor.set_name("Ocean");
//! editor.set_color(PaletteRole::Primary, "#0ea5e9", None, Instant::now());
//!
//! let record = editor.save(&mut repo, Utc::now()).unwrap();
//! assert!(record.css_class_name.starts_with("theme-ocean_"));
//! assert_eq!(repo.list().unwrap().len(), 1);
//! ```

pub mod cli;
pub mod config;
mod debounce;
pub mod logging;
mod session;
mod swatch;

// Re-export public API
pub use cli::{run, Cli, Commands};
pub use config::{Config, ConfigError, CONFIG_ENV};
pub use debounce::{Debouncer, DEFAULT_DELAY};
pub use session::{
    css_class_name, default_accent, default_primary, ContrastRatios, EditorError, EditorState,
    LoadGuard, Preview, ThemeEditor, DEFAULT_ACCENT, DEFAULT_ACCENT_INTERACTION,
    DEFAULT_PRIMARY, DEFAULT_PRIMARY_INTERACTION,
};
pub use swatch::{rgb_to_ansi256, swatch};
