//! Mood entry store
//!
//! Owns the ordered collection of [`MoodEntry`] values, most-recent-first.
//! All mutations are synchronous; the in-memory collection is authoritative
//! and the blob store is rewritten best-effort after every change.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{validate_mood, validate_note, MoodEntry};

use super::BlobStore;

/// Blob key for the serialized entry collection.
pub const ENTRIES_KEY: &str = "entries";

/// Partial update for [`EntryStore::update`].
///
/// `None` fields are left untouched. A note of `Some("")` (or whitespace
/// only) clears the existing note.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub mood: Option<u8>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Store owning all mood entries.
pub struct EntryStore {
    entries: Vec<MoodEntry>,
    blobs: Arc<BlobStore>,
}

impl EntryStore {
    /// Load the store from the persisted blob.
    ///
    /// A missing blob starts empty; a corrupt blob is logged and discarded
    /// rather than crashing.
    pub fn load(blobs: Arc<BlobStore>) -> Self {
        let entries = match blobs.get(ENTRIES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<MoodEntry>>(&json) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt entries blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read entries blob, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "Loaded mood entries");
        Self { entries, blobs }
    }

    /// Log a new mood entry.
    ///
    /// Rejects out-of-range moods and over-long notes without mutating any
    /// state. `date` defaults to the current local calendar day.
    pub fn add(
        &mut self,
        mood: u8,
        note: Option<String>,
        date: Option<NaiveDate>,
    ) -> Result<MoodEntry> {
        validate_mood(mood)?;
        let note = normalize_note(note)?;

        let now = Utc::now();
        let entry = MoodEntry {
            id: Uuid::new_v4().to_string(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            mood,
            note,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(id = %entry.id, date = %entry.date, mood = entry.mood, "Logged mood entry");
        self.entries.insert(0, entry.clone());
        self.persist();
        Ok(entry)
    }

    /// Merge a patch into the matching entry, refreshing `updated_at`.
    pub fn update(&mut self, id: &str, patch: EntryPatch) -> Result<MoodEntry> {
        if let Some(mood) = patch.mood {
            validate_mood(mood)?;
        }
        let note = match patch.note {
            Some(note) => Some(normalize_note(Some(note))?),
            None => None,
        };

        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::EntryNotFound(id.to_string()))?;

        if let Some(mood) = patch.mood {
            entry.mood = mood;
        }
        if let Some(note) = note {
            entry.note = note;
        }
        if let Some(date) = patch.date {
            entry.date = date;
        }
        entry.updated_at = Utc::now();

        let updated = entry.clone();
        tracing::info!(id = %updated.id, "Updated mood entry");
        self.persist();
        Ok(updated)
    }

    /// Delete the matching entry. A no-op if the id is absent; returns
    /// whether an entry was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            tracing::debug!(id, "Delete skipped, entry not found");
            return false;
        }
        tracing::info!(id, "Deleted mood entry");
        self.persist();
        true
    }

    /// Snapshot of all entries, most-recent-first.
    pub fn list(&self) -> Vec<MoodEntry> {
        self.entries.clone()
    }

    /// Borrowed view of all entries for derivation.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    /// Entries whose date falls within the inclusive range.
    pub fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<MoodEntry> {
        self.entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries (explicit user action).
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.blobs.remove(ENTRIES_KEY) {
            tracing::warn!(error = %e, "Failed to clear entries blob");
        }
    }

    /// Rewrite the persisted blob. Best-effort: the in-memory collection is
    /// authoritative, so failures are logged and swallowed.
    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = self.blobs.set(ENTRIES_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to persist mood entries");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode mood entries"),
        }
    }
}

/// Validate and trim a note, mapping blank notes to `None`.
fn normalize_note(note: Option<String>) -> Result<Option<String>> {
    match note {
        Some(note) => {
            validate_note(&note)?;
            let trimmed = note.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NOTE_MAX_CHARS;

    fn open_store() -> EntryStore {
        let blobs = Arc::new(BlobStore::open_in_memory().unwrap());
        blobs.migrate().unwrap();
        EntryStore::load(blobs)
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_rejects_out_of_range_mood() {
        let mut store = open_store();
        assert!(matches!(
            store.add(0, None, None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            store.add(6, None, None),
            Err(Error::Validation(_))
        ));
        assert!(store.is_empty(), "rejected add must not mutate state");
    }

    #[test]
    fn test_add_rejects_over_long_note() {
        let mut store = open_store();
        let long = "x".repeat(NOTE_MAX_CHARS + 1);
        assert!(store.add(3, Some(long), None).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_prepends_and_defaults_date() {
        let mut store = open_store();
        let first = store.add(3, None, Some(day("2026-08-01"))).unwrap();
        let second = store.add(4, Some("better".into()), None).unwrap();

        assert_eq!(second.date, Local::now().date_naive());
        assert_eq!(store.len(), 2);
        // Most-recent-first order
        assert_eq!(store.entries()[0].id, second.id);
        assert_eq!(store.entries()[1].id, first.id);
    }

    #[test]
    fn test_blank_note_stored_as_none() {
        let mut store = open_store();
        let entry = store.add(3, Some("   ".into()), None).unwrap();
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_update_merges_and_refreshes_timestamp() {
        let mut store = open_store();
        let entry = store.add(2, Some("rough day".into()), None).unwrap();

        let updated = store
            .update(
                &entry.id,
                EntryPatch {
                    mood: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.mood, 4);
        assert_eq!(updated.note.as_deref(), Some("rough day"));
        assert!(updated.updated_at >= entry.updated_at);
        assert_eq!(updated.created_at, entry.created_at);
    }

    #[test]
    fn test_update_missing_id() {
        let mut store = open_store();
        assert!(matches!(
            store.update("nope", EntryPatch::default()),
            Err(Error::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_update_rejects_invalid_mood_without_mutation() {
        let mut store = open_store();
        let entry = store.add(3, None, None).unwrap();
        assert!(store
            .update(
                &entry.id,
                EntryPatch {
                    mood: Some(9),
                    ..Default::default()
                }
            )
            .is_err());
        assert_eq!(store.entries()[0].mood, 3);
    }

    #[test]
    fn test_delete() {
        let mut store = open_store();
        let entry = store.add(5, None, None).unwrap();
        assert!(store.delete(&entry.id));
        assert!(store.is_empty());
        // Deleting again is a no-op, never an error
        assert!(!store.delete(&entry.id));
    }

    #[test]
    fn test_entries_in_range_inclusive() {
        let mut store = open_store();
        store.add(3, None, Some(day("2026-08-01"))).unwrap();
        store.add(4, None, Some(day("2026-08-03"))).unwrap();
        store.add(5, None, Some(day("2026-08-05"))).unwrap();

        let range = store.entries_in_range(day("2026-08-01"), day("2026-08-03"));
        assert_eq!(range.len(), 2);
        assert!(range.iter().all(|e| e.date <= day("2026-08-03")));
    }

    #[test]
    fn test_persists_across_reload() {
        let blobs = Arc::new(BlobStore::open_in_memory().unwrap());
        blobs.migrate().unwrap();

        let mut store = EntryStore::load(Arc::clone(&blobs));
        store.add(4, Some("persisted".into()), None).unwrap();
        drop(store);

        let reloaded = EntryStore::load(blobs);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].note.as_deref(), Some("persisted"));
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_empty() {
        let blobs = Arc::new(BlobStore::open_in_memory().unwrap());
        blobs.migrate().unwrap();
        blobs.set(ENTRIES_KEY, "{not json").unwrap();

        let store = EntryStore::load(blobs);
        assert!(store.is_empty());
    }
}
