//! Repository behavior over the file backend.

use chrono::{TimeZone, Utc};
use huekit_palette::{
    compile_theme_css, interaction_color, parse_theme_css, ContrastChoice, PaletteState,
    ThemeInput, ThemePalette,
};
use huekit_store::{
    FileStore, KeyValueStore, Preferences, ThemeMode, ThemeRecord, ThemeRepository, Upsert,
    THEMES_KEY,
};
use tempfile::TempDir;

fn saved_theme(id: &str, seed: &str) -> ThemeRecord {
    let state = PaletteState::new(seed, interaction_color(seed), ContrastChoice::White);
    let input = ThemeInput {
        class_name: format!("theme-{}", id),
        primary: ThemePalette::uniform(state.clone()),
        accent: ThemePalette::uniform(state),
        use_separate_accent: false,
        use_separate_dark_mode: false,
    };
    let created = Utc.with_ymd_and_hms(2026, 9, 14, 8, 0, 0).unwrap();
    ThemeRecord {
        id: id.to_string(),
        label: id.to_string(),
        description: String::new(),
        css: compile_theme_css(&input),
        primary: input.primary,
        accent: input.accent,
        use_separate_accent: false,
        use_separate_dark_mode: false,
        css_class_name: input.class_name,
        created_at: created,
        modified_at: created,
        is_user_created: true,
    }
}

#[test]
fn themes_survive_reopening_the_store() {
    let tmp = TempDir::new().unwrap();

    let mut repo = ThemeRepository::new(FileStore::new(tmp.path()));
    assert_eq!(repo.upsert(saved_theme("ocean", "#0ea5e9")).unwrap(), Upsert::Inserted);
    Preferences {
        theme: "theme-ocean".into(),
        theme_mode: ThemeMode::Light,
    }
    .save(repo.store_mut())
    .unwrap();
    drop(repo);

    let reopened = ThemeRepository::new(FileStore::new(tmp.path()));
    let record = reopened.get("ocean").unwrap().expect("record persisted");
    assert_eq!(record, saved_theme("ocean", "#0ea5e9"));

    let prefs = Preferences::load(reopened.store()).unwrap();
    assert_eq!(prefs.active_theme(), Some("theme-ocean"));
    assert_eq!(prefs.theme_mode, ThemeMode::Light);
}

#[test]
fn stored_css_is_readable() {
    let tmp = TempDir::new().unwrap();
    let mut repo = ThemeRepository::new(FileStore::new(tmp.path()));
    repo.upsert(saved_theme("forest", "#16a34a")).unwrap();

    let record = repo.get("forest").unwrap().unwrap();
    let sheet = parse_theme_css(&record.css).unwrap();
    assert_eq!(sheet.class_names(), vec!["theme-forest"]);
}

#[test]
fn collection_file_is_a_json_array() {
    let tmp = TempDir::new().unwrap();
    let mut repo = ThemeRepository::new(FileStore::new(tmp.path()));
    repo.upsert(saved_theme("a", "#d946ef")).unwrap();
    repo.upsert(saved_theme("b", "#06b6d4")).unwrap();

    let raw = repo.store().get(THEMES_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["cssClassName"], "theme-b");
}

#[test]
fn unreadable_file_is_treated_as_empty() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("customThemes.json"), "not json").unwrap();

    let mut repo = ThemeRepository::new(FileStore::new(tmp.path()));
    assert!(repo.list().unwrap().is_empty());
    repo.upsert(saved_theme("a", "#d946ef")).unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);
}
