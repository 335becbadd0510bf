//! Display preferences: the active theme and light/dark mode.
//!
//! Both are stored as raw strings, `theme` holding the active theme's CSS
//! class (empty for the brand default) and `themeMode` one of `system`,
//! `light` or `dark`.

use huekit_palette::ColorScheme;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kv::KeyValueStore;

/// Key of the active theme class.
pub const THEME_KEY: &str = "theme";
/// Key of the display mode.
pub const THEME_MODE_KEY: &str = "themeMode";

/// How the light/dark scheme is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the operating system.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Resolves the mode to a scheme, asking `detect` only for `System`.
    pub fn resolve_with(self, detect: impl FnOnce() -> ColorScheme) -> ColorScheme {
        match self {
            ThemeMode::System => detect(),
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "system" => Ok(ThemeMode::System),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!(
                "unknown theme mode '{}': expected system, light or dark",
                other
            )),
        }
    }
}

/// The scheme the OS prefers, light when it cannot be determined.
pub fn detect_os_scheme() -> ColorScheme {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => ColorScheme::Dark,
        Ok(_) => ColorScheme::Light,
        Err(err) => {
            tracing::debug!(%err, "OS color scheme detection failed");
            ColorScheme::Light
        }
    }
}

/// The scheme `mode` renders with on this machine.
pub fn effective_scheme(mode: ThemeMode) -> ColorScheme {
    mode.resolve_with(detect_os_scheme)
}

/// The persisted display preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Active theme class; empty means the brand default.
    pub theme: String,
    pub theme_mode: ThemeMode,
}

impl Preferences {
    /// Reads preferences, defaulting anything missing or unrecognized.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let theme = store.get(THEME_KEY)?.unwrap_or_default();
        let theme_mode = match store.get(THEME_MODE_KEY)? {
            Some(raw) => raw.parse::<ThemeMode>().unwrap_or_else(|err| {
                tracing::debug!(%err, "falling back to system theme mode");
                ThemeMode::System
            }),
            None => ThemeMode::System,
        };
        Ok(Self { theme, theme_mode })
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(THEME_KEY, &self.theme)?;
        store.set(THEME_MODE_KEY, self.theme_mode.as_str())
    }

    /// The active theme class, if one is set.
    pub fn active_theme(&self) -> Option<&str> {
        let theme = self.theme.trim();
        (!theme.is_empty()).then_some(theme)
    }
}

/// Computes the document root's class list after applying a theme.
///
/// Every `theme-*` class is dropped, `theme_class` is added unless blank, and
/// `dark` is added or removed per `is_dark`. Other classes keep their order.
pub fn root_classes(existing: &str, theme_class: &str, is_dark: bool) -> String {
    let mut classes: Vec<&str> = existing
        .split_whitespace()
        .filter(|c| !c.starts_with("theme-") && *c != "dark")
        .collect();

    let theme_class = theme_class.trim();
    if !theme_class.is_empty() && !classes.contains(&theme_class) {
        classes.push(theme_class);
    }
    if is_dark {
        classes.push("dark");
    }
    classes.join(" ")
}
