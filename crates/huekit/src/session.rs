//! The theme editing session.
//!
//! [`ThemeEditor`] owns the form state of the theme customizer: a name, two
//! palettes, the separate-accent and separate-dark-mode switches, and the
//! preview scheme. It applies the derived rules that keep the palettes
//! consistent while the user edits, debounces raw color input, and turns the
//! settled state into CSS and saved [`ThemeRecord`]s.
//!
//! # States
//!
//! ```text
//!            edit               begin_load()            guard dropped
//!   Idle ──────────▶ Editing ◀───────────────────────────────────────┐
//!     │                                                              │
//!     └──────── begin_load() ──▶ Loading ────────────────────────────┘
//! ```
//!
//! While a [`LoadGuard`] is alive the editor is `Loading`: the guard assigns
//! fields verbatim and the derived rules cannot run, because the guard holds
//! the only mutable borrow. Dropping the guard commits the load in one step:
//! debouncers settle on the loaded palettes and interaction colors are
//! recomputed.
//!
//! # Derived rules
//!
//! - A color change without separate dark mode (or without a scheme) applies
//!   to light and dark alike; with separate dark mode only to the given
//!   scheme.
//! - Without separate accent the accent palette mirrors the primary one.
//! - Enabling separate accent resets the accent to its own defaults.
//! - Disabling separate dark mode copies light into dark for both palettes
//!   and switches the preview back to light.
//! - Whenever input settles, the four interaction colors are recomputed.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use huekit_palette::{
    compile_theme_css, CachePolicy, ColorScheme, ContrastChoice, ContrastReport,
    InteractionResolver, PaletteRole, PaletteState, ShadeScale, ThemeInput, ThemePalette,
    PLACEHOLDER_CLASS_NAME,
};
use huekit_store::{KeyValueStore, StoreError, ThemeRecord, ThemeRepository};
use serde::Serialize;
use thiserror::Error;

use crate::debounce::{Debouncer, DEFAULT_DELAY};

pub const DEFAULT_PRIMARY: &str = "#d946ef";
pub const DEFAULT_PRIMARY_INTERACTION: &str = "#c026d3";
pub const DEFAULT_ACCENT: &str = "#06b6d4";
pub const DEFAULT_ACCENT_INTERACTION: &str = "#0891b2";

/// The palette a fresh form starts with, for both roles.
pub fn default_primary() -> ThemePalette {
    ThemePalette::uniform(PaletteState::new(
        DEFAULT_PRIMARY,
        DEFAULT_PRIMARY_INTERACTION,
        ContrastChoice::White,
    ))
}

/// The accent palette installed when separate accent is switched on.
pub fn default_accent() -> ThemePalette {
    ThemePalette::uniform(PaletteState::new(
        DEFAULT_ACCENT,
        DEFAULT_ACCENT_INTERACTION,
        ContrastChoice::White,
    ))
}

/// Class name for a theme called `name`, saved at `millis`.
///
/// Blank names produce [`PLACEHOLDER_CLASS_NAME`].
pub fn css_class_name(name: &str, millis: i64) -> String {
    if name.trim().is_empty() {
        return PLACEHOLDER_CLASS_NAME.to_string();
    }
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("theme-{}_{}", slug, millis)
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("please enter a theme name")]
    MissingName,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Fresh or reset form.
    Idle,
    /// A load transaction is open.
    Loading,
    /// The user has changed something, or a load committed.
    Editing,
}

/// Contrast ratios of the four settled defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastRatios {
    pub primary_light: ContrastReport,
    pub primary_dark: ContrastReport,
    pub accent_light: ContrastReport,
    pub accent_dark: ContrastReport,
}

/// What the preview pane renders for one scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub scheme: ColorScheme,
    pub primary: ShadeScale,
    pub accent: ShadeScale,
    pub primary_contrast: ContrastChoice,
    pub accent_contrast: ContrastChoice,
}

// ─── Editor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ThemeEditor {
    client_id: String,
    state: EditorState,
    name: String,
    editing: Option<(String, DateTime<Utc>)>,
    primary: Debouncer<ThemePalette>,
    accent: Debouncer<ThemePalette>,
    use_separate_accent: bool,
    use_separate_dark_mode: bool,
    preview_scheme: ColorScheme,
    resolver: InteractionResolver,
}

impl ThemeEditor {
    /// A fresh editor; `client_id` becomes part of new theme ids.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            state: EditorState::Idle,
            name: String::new(),
            editing: None,
            primary: Debouncer::new(default_primary(), DEFAULT_DELAY),
            accent: Debouncer::new(default_primary(), DEFAULT_DELAY),
            use_separate_accent: false,
            use_separate_dark_mode: false,
            preview_scheme: ColorScheme::Light,
            resolver: InteractionResolver::default(),
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.primary = Debouncer::new(self.primary.value().clone(), delay);
        self.accent = Debouncer::new(self.accent.value().clone(), delay);
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.resolver = InteractionResolver::new(policy);
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the record being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn use_separate_accent(&self) -> bool {
        self.use_separate_accent
    }

    pub fn use_separate_dark_mode(&self) -> bool {
        self.use_separate_dark_mode
    }

    pub fn preview_scheme(&self) -> ColorScheme {
        self.preview_scheme
    }

    /// The palette as last edited, possibly not settled yet.
    pub fn palette(&self, role: PaletteRole) -> &ThemePalette {
        self.input(role).latest()
    }

    /// The settled palette that output is computed from.
    pub fn settled_palette(&self, role: PaletteRole) -> &ThemePalette {
        self.input(role).value()
    }

    pub fn is_pending(&self) -> bool {
        self.primary.is_pending() || self.accent.is_pending()
    }

    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }

    fn input(&self, role: PaletteRole) -> &Debouncer<ThemePalette> {
        match role {
            PaletteRole::Primary => &self.primary,
            PaletteRole::Accent => &self.accent,
        }
    }

    fn input_mut(&mut self, role: PaletteRole) -> &mut Debouncer<ThemePalette> {
        match role {
            PaletteRole::Primary => &mut self.primary,
            PaletteRole::Accent => &mut self.accent,
        }
    }

    // ─── Edits ──────────────────────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.state = EditorState::Editing;
    }

    pub fn set_preview_scheme(&mut self, scheme: ColorScheme) {
        self.preview_scheme = scheme;
    }

    /// Changes a palette's base color.
    ///
    /// `scheme` only matters with separate dark mode; otherwise both schemes
    /// change together.
    pub fn set_color(
        &mut self,
        role: PaletteRole,
        color: &str,
        scheme: Option<ColorScheme>,
        now: Instant,
    ) {
        let separate_dark = self.use_separate_dark_mode;
        self.edit(role, now, |palette| match scheme {
            Some(scheme) if separate_dark => palette.get_mut(scheme).default = color.to_string(),
            _ => {
                palette.light.default = color.to_string();
                palette.dark.default = color.to_string();
            }
        });
    }

    /// Changes a palette's text color, with the same scheme rule as
    /// [`set_color`](Self::set_color).
    pub fn set_contrast(
        &mut self,
        role: PaletteRole,
        contrast: ContrastChoice,
        scheme: Option<ColorScheme>,
        now: Instant,
    ) {
        let separate_dark = self.use_separate_dark_mode;
        self.edit(role, now, |palette| match scheme {
            Some(scheme) if separate_dark => palette.get_mut(scheme).contrast = contrast,
            _ => {
                palette.light.contrast = contrast;
                palette.dark.contrast = contrast;
            }
        });
    }

    pub fn set_use_separate_accent(&mut self, enabled: bool, now: Instant) {
        if enabled == self.use_separate_accent {
            return;
        }
        self.use_separate_accent = enabled;
        self.state = EditorState::Editing;

        let accent = if enabled {
            default_accent()
        } else {
            self.primary.latest().clone()
        };
        self.accent.push(accent, now);
    }

    pub fn set_use_separate_dark_mode(&mut self, enabled: bool, now: Instant) {
        if enabled == self.use_separate_dark_mode {
            return;
        }
        self.use_separate_dark_mode = enabled;
        self.state = EditorState::Editing;

        if !enabled {
            self.preview_scheme = ColorScheme::Light;
            for role in [PaletteRole::Primary, PaletteRole::Accent] {
                let mut palette = self.input(role).latest().clone();
                palette.dark = palette.light.clone();
                self.input_mut(role).push(palette, now);
            }
        }
    }

    fn edit(&mut self, role: PaletteRole, now: Instant, change: impl FnOnce(&mut ThemePalette)) {
        let mut palette = self.input(role).latest().clone();
        change(&mut palette);

        if role == PaletteRole::Primary && !self.use_separate_accent {
            self.accent.push(palette.clone(), now);
        }
        self.input_mut(role).push(palette, now);
        self.state = EditorState::Editing;
    }

    // ─── Settling ───────────────────────────────────────────────────────────

    /// Settles debounced input whose quiet period has elapsed.
    ///
    /// Returns whether anything settled.
    pub fn tick(&mut self, now: Instant) -> bool {
        let primary = self.primary.poll(now).is_some();
        let accent = self.accent.poll(now).is_some();
        if primary || accent {
            self.refresh_interactions();
            true
        } else {
            false
        }
    }

    /// Settles all pending input immediately.
    pub fn flush(&mut self) -> bool {
        let primary = self.primary.flush().is_some();
        let accent = self.accent.flush().is_some();
        if primary || accent {
            self.refresh_interactions();
            true
        } else {
            false
        }
    }

    fn refresh_interactions(&mut self) {
        for role in [PaletteRole::Primary, PaletteRole::Accent] {
            let mut settled = self.input(role).value().clone();
            for scheme in ColorScheme::ALL {
                let state = settled.get_mut(scheme);
                state.interaction = self.resolver.resolve(&state.default);
            }
            *self.input_mut(role).value_mut() = settled;
        }
        tracing::trace!(
            hits = self.resolver.cache().stats().hits,
            misses = self.resolver.cache().stats().misses,
            "refreshed interaction colors"
        );
    }

    // ─── Loading ────────────────────────────────────────────────────────────

    /// Opens a load transaction.
    pub fn begin_load(&mut self) -> LoadGuard<'_> {
        self.state = EditorState::Loading;
        LoadGuard { editor: self }
    }

    /// Loads a saved record for editing.
    pub fn load(&mut self, record: &ThemeRecord) {
        let mut load = self.begin_load();
        load.record(record);
    }

    /// Returns the form to its initial state.
    pub fn reset(&mut self) {
        self.name.clear();
        self.editing = None;
        self.primary.reset(default_primary());
        self.accent.reset(default_primary());
        self.use_separate_accent = false;
        self.use_separate_dark_mode = false;
        self.preview_scheme = ColorScheme::Light;
        self.state = EditorState::Idle;
        if self.resolver.cache().policy() == CachePolicy::Session {
            self.resolver.clear();
        }
    }

    // ─── Output ─────────────────────────────────────────────────────────────

    /// The class name the theme would be saved under at `millis`.
    pub fn css_class_name(&self, millis: i64) -> String {
        css_class_name(&self.name, millis)
    }

    /// Compiler input from the settled state.
    pub fn theme_input(&self, class_name: impl Into<String>) -> ThemeInput {
        ThemeInput {
            class_name: class_name.into(),
            primary: self.primary.value().clone(),
            accent: self.accent.value().clone(),
            use_separate_accent: self.use_separate_accent,
            use_separate_dark_mode: self.use_separate_dark_mode,
        }
    }

    /// The CSS for the settled state under `class_name`.
    pub fn compiled_css(&self, class_name: impl Into<String>) -> String {
        compile_theme_css(&self.theme_input(class_name))
    }

    pub fn contrast_ratios(&self) -> ContrastRatios {
        let report = |palette: &ThemePalette, scheme| {
            ContrastReport::for_color(&palette.get(scheme).default)
        };
        let (primary, accent) = (self.primary.value(), self.accent.value());
        ContrastRatios {
            primary_light: report(primary, ColorScheme::Light),
            primary_dark: report(primary, ColorScheme::Dark),
            accent_light: report(accent, ColorScheme::Light),
            accent_dark: report(accent, ColorScheme::Dark),
        }
    }

    /// Scales and text colors for previewing `scheme`. Dark scales are
    /// reversed, as in the compiled CSS.
    pub fn preview(&mut self, scheme: ColorScheme) -> Preview {
        let primary = self.primary.value().get(scheme).clone();
        let accent = self.accent.value().get(scheme).clone();

        let mut scale = |state: &PaletteState| {
            let scale = self.resolver.scale(&state.default);
            match scheme {
                ColorScheme::Light => scale.clone(),
                ColorScheme::Dark => scale.reversed(),
            }
        };

        Preview {
            scheme,
            primary: scale(&primary),
            accent: scale(&accent),
            primary_contrast: primary.contrast,
            accent_contrast: accent.contrast,
        }
    }

    /// Saves the settled theme and resets the form.
    ///
    /// A loaded record is replaced and keeps its id and creation time; a new
    /// one gets id `theme-{client}-{millis}`.
    ///
    /// # Errors
    ///
    /// [`EditorError::MissingName`] for a blank name, [`EditorError::Store`]
    /// when the repository write fails. The form is kept in both cases.
    pub fn save<S: KeyValueStore>(
        &mut self,
        repo: &mut ThemeRepository<S>,
        now: DateTime<Utc>,
    ) -> Result<ThemeRecord, EditorError> {
        if self.name.trim().is_empty() {
            return Err(EditorError::MissingName);
        }
        self.primary.flush();
        self.accent.flush();
        self.refresh_interactions();

        let millis = now.timestamp_millis();
        let (id, created_at) = match &self.editing {
            Some((id, created_at)) => (id.clone(), *created_at),
            None => (format!("theme-{}-{}", self.client_id, millis), now),
        };
        let class_name = self.css_class_name(millis);
        let css = self.compiled_css(class_name.clone());

        let record = ThemeRecord {
            id,
            label: self.name.clone(),
            description: String::new(),
            primary: self.primary.value().clone(),
            accent: self.accent.value().clone(),
            use_separate_accent: self.use_separate_accent,
            use_separate_dark_mode: self.use_separate_dark_mode,
            css_class_name: class_name,
            css,
            created_at,
            modified_at: now,
            is_user_created: true,
        };

        let outcome = repo.upsert(record.clone())?;
        tracing::info!(id = %record.id, ?outcome, "theme saved");
        self.reset();
        Ok(record)
    }
}

impl Default for ThemeEditor {
    fn default() -> Self {
        Self::new("local")
    }
}

// ─── Load transaction ───────────────────────────────────────────────────────

/// An open load transaction; see [`ThemeEditor::begin_load`].
///
/// Setters assign verbatim. Dropping the guard commits.
pub struct LoadGuard<'a> {
    editor: &'a mut ThemeEditor,
}

impl LoadGuard<'_> {
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.editor.name = name.into();
        self
    }

    pub fn palettes(&mut self, primary: ThemePalette, accent: ThemePalette) -> &mut Self {
        self.editor.primary.reset(primary);
        self.editor.accent.reset(accent);
        self
    }

    pub fn flags(&mut self, use_separate_accent: bool, use_separate_dark_mode: bool) -> &mut Self {
        self.editor.use_separate_accent = use_separate_accent;
        self.editor.use_separate_dark_mode = use_separate_dark_mode;
        self
    }

    /// Loads every editable field of `record` and marks it as the record
    /// being edited.
    pub fn record(&mut self, record: &ThemeRecord) -> &mut Self {
        self.editor.editing = Some((record.id.clone(), record.created_at));
        self.name(record.label.clone())
            .palettes(record.primary.clone(), record.accent.clone())
            .flags(record.use_separate_accent, record.use_separate_dark_mode)
    }

    /// The editor's state; always [`EditorState::Loading`] while the guard
    /// lives.
    pub fn state(&self) -> EditorState {
        self.editor.state
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.editor.primary.flush();
        self.editor.accent.flush();
        self.editor.refresh_interactions();
        self.editor.state = EditorState::Editing;
        tracing::debug!(name = %self.editor.name, "theme load committed");
    }
}
