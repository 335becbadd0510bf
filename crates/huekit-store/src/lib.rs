//! Huekit store - persistence for saved themes and display preferences.
//!
//! Saved themes are plain JSON in a key-value store:
//!
//! | Key | Value |
//! |-----|-------|
//! | `customThemes` | JSON array of [`ThemeRecord`] |
//! | `theme` | active theme class, empty for the brand default |
//! | `themeMode` | `system`, `light` or `dark` |
//!
//! # Quick Start
//!
//! ```rust
//! use huekit_store::{MemoryStore, Preferences, ThemeMode, ThemeRepository};
//!
//! let mut repo = ThemeRepository::new(MemoryStore::new());
//! assert!(repo.list().unwrap().is_empty());
//!
//! let prefs = Preferences { theme: "theme-ocean_1".into(), theme_mode: ThemeMode::Dark };
//! prefs.save(repo.store_mut()).unwrap();
//! assert_eq!(Preferences::load(repo.store()).unwrap().active_theme(), Some("theme-ocean_1"));
//! ```

mod error;
mod kv;
mod preferences;
mod record;
mod repository;

// Re-export public API
pub use error::{Result, StoreError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::{
    detect_os_scheme, effective_scheme, root_classes, Preferences, ThemeMode, THEME_KEY,
    THEME_MODE_KEY,
};
pub use record::ThemeRecord;
pub use repository::{ImportSummary, ThemeRepository, Upsert, THEMES_KEY};
