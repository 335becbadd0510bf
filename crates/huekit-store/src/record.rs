//! Saved theme records.

use chrono::{DateTime, Duration, Utc};
use huekit_palette::{compile_theme_css, ThemeInput, ThemePalette};
use serde::{Deserialize, Serialize};

fn user_created() -> bool {
    true
}

/// A named theme as persisted in the `customThemes` collection.
///
/// Records are created on save and replaced wholesale on update; they never
/// reference each other. `css` is the compiled stylesheet at save time and is
/// stored verbatim so a theme can be applied without recompiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "primaryColor")]
    pub primary: ThemePalette,
    #[serde(rename = "accentColor")]
    pub accent: ThemePalette,
    pub use_separate_accent: bool,
    pub use_separate_dark_mode: bool,
    pub css_class_name: String,
    pub css: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default = "user_created")]
    pub is_user_created: bool,
}

impl ThemeRecord {
    /// The compiler input this record was saved from.
    pub fn input(&self) -> ThemeInput {
        ThemeInput {
            class_name: self.css_class_name.clone(),
            primary: self.primary.clone(),
            accent: self.accent.clone(),
            use_separate_accent: self.use_separate_accent,
            use_separate_dark_mode: self.use_separate_dark_mode,
        }
    }

    /// Regenerates `css` from the stored palettes.
    pub fn recompile(&mut self) {
        self.css = compile_theme_css(&self.input());
    }

    /// Whether the record was created at most `days` days before `now`.
    ///
    /// Drives the "new" badge next to recently saved themes. A window too
    /// large to represent covers every record.
    pub fn is_recent(&self, now: DateTime<Utc>, days: i64) -> bool {
        let age = now.signed_duration_since(self.created_at);
        Duration::try_days(days).map_or(true, |window| age <= window)
    }
}
