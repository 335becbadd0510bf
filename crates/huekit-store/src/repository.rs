//! The saved-themes collection.
//!
//! All records live in one JSON array under [`THEMES_KEY`]. Every operation
//! reads the array, changes it, and writes it back whole; collections are a
//! few dozen entries at most.
//!
//! A stored value that does not parse is logged and treated as an empty
//! collection, so one bad write never locks a user out of saving new themes.

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::preferences::Preferences;
use crate::record::ThemeRecord;

/// Key of the saved-themes array.
pub const THEMES_KEY: &str = "customThemes";

/// Outcome of [`ThemeRepository::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Counts reported by [`ThemeRepository::import_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// CRUD access to saved themes on top of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ThemeRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ThemeRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// All records in stored order.
    pub fn load(&self) -> Result<Vec<ThemeRecord>> {
        let Some(raw) = self.store.get(THEMES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(%err, key = THEMES_KEY, "stored themes are unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&mut self, records: &[ThemeRecord]) -> Result<()> {
        let json = serde_json::to_string(records).map_err(StoreError::Encode)?;
        self.store.set(THEMES_KEY, &json)
    }

    /// All records, newest `created_at` first.
    pub fn list(&self) -> Result<Vec<ThemeRecord>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    pub fn get(&self, id: &str) -> Result<Option<ThemeRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Looks a record up by id, falling back to its CSS class name.
    pub fn find(&self, id_or_class: &str) -> Result<Option<ThemeRecord>> {
        let records = self.load()?;
        let by_id = records.iter().position(|r| r.id == id_or_class);
        let index = by_id.or_else(|| records.iter().position(|r| r.css_class_name == id_or_class));
        Ok(index.and_then(|i| records.into_iter().nth(i)))
    }

    /// Replaces the record with the same id, or appends it.
    pub fn upsert(&mut self, record: ThemeRecord) -> Result<Upsert> {
        let mut records = self.load()?;
        let outcome = match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                Upsert::Updated
            }
            None => {
                records.push(record);
                Upsert::Inserted
            }
        };
        self.save_all(&records)?;
        tracing::debug!(?outcome, count = records.len(), "saved theme");
        Ok(outcome)
    }

    /// Deletes a record by id. Returns whether it existed.
    ///
    /// If the deleted theme was the active one, the active-theme preference
    /// is cleared so the brand default applies again.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut records = self.load()?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = records.remove(index);
        self.save_all(&records)?;

        let mut prefs = Preferences::load(&self.store)?;
        if prefs.theme == removed.css_class_name {
            prefs.theme.clear();
            prefs.save(&mut self.store)?;
            tracing::debug!(id, "cleared active theme");
        }
        Ok(true)
    }

    /// All records as pretty-printed JSON, in stored order.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.load()?).map_err(StoreError::Encode)
    }

    /// Merges records from a JSON array into the collection by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::Import`] when `json` is not an array of theme records;
    /// nothing is written in that case.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let incoming: Vec<ThemeRecord> = serde_json::from_str(json).map_err(StoreError::Import)?;
        let mut records = self.load()?;
        let mut summary = ImportSummary::default();

        for record in incoming {
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => {
                    *existing = record;
                    summary.updated += 1;
                }
                None => {
                    records.push(record);
                    summary.inserted += 1;
                }
            }
        }

        self.save_all(&records)?;
        Ok(summary)
    }
}
