//! Integration tests for the seren journal core
//!
//! These tests exercise the full store → statistics → session flow against
//! a real on-disk blob store, verifying the persistence contract (read
//! once at startup, rewrite after every change) end to end.

use std::sync::Arc;

use chrono::NaiveDate;
use seren_core::ai::{ChatSession, ReplyEngine, RuleResponder, HISTORY_CAP};
use seren_core::stats;
use seren_core::store::{BlobStore, EntryPatch, EntryStore, ProfileStore};
use seren_core::types::{ChatRole, MoodTrend};
use seren_core::{export, Error};
use tempfile::TempDir;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn open_blobs(dir: &TempDir) -> Arc<BlobStore> {
    let path = dir.path().join("journal.db");
    let blobs = Arc::new(BlobStore::open(&path).expect("open blob store"));
    blobs.migrate().expect("migrate blob store");
    blobs
}

// ============================================
// Entry store + persistence
// ============================================

#[test]
fn test_entry_lifecycle_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let kept_id;
    {
        let blobs = open_blobs(&dir);
        let mut entries = EntryStore::load(Arc::clone(&blobs));

        let first = entries
            .add(2, Some("work stress".into()), Some(day("2026-08-01")))
            .unwrap();
        let second = entries
            .add(5, Some("long walk".into()), Some(day("2026-08-02")))
            .unwrap();

        entries
            .update(
                &first.id,
                EntryPatch {
                    mood: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(entries.delete(&first.id));
        kept_id = second.id;
    }

    // Fresh process: state must come back from the blob store
    let blobs = open_blobs(&dir);
    let entries = EntryStore::load(blobs);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries.entries()[0].id, kept_id);
    assert_eq!(entries.entries()[0].mood, 5);
}

#[test]
fn test_rejected_add_leaves_blob_untouched() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);

    let mut entries = EntryStore::load(Arc::clone(&blobs));
    entries.add(4, None, Some(day("2026-08-01"))).unwrap();
    assert!(matches!(
        entries.add(0, None, None),
        Err(Error::Validation(_))
    ));

    let reloaded = EntryStore::load(blobs);
    assert_eq!(reloaded.len(), 1);
}

// ============================================
// Statistics over stored entries
// ============================================

#[test]
fn test_stats_from_stored_collection() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);
    let mut entries = EntryStore::load(blobs);

    let today = day("2026-08-06");
    // By recency: 5, 5, 4, 2, 5 => streak 3
    for (date, mood) in [
        ("2026-08-02", 5),
        ("2026-08-03", 2),
        ("2026-08-04", 4),
        ("2026-08-05", 5),
        ("2026-08-06", 5),
    ] {
        entries.add(mood, None, Some(day(date))).unwrap();
    }

    let snapshot = entries.list();
    let stats = stats::calculate_stats(&snapshot, today);

    assert_eq!(stats.total_entries, 5);
    assert_eq!(stats.average_mood, 4.2);
    assert_eq!(stats.streak, 3);
    // Previous week has no entries, so the trend stays at its default
    assert_eq!(stats.trend, MoodTrend::Stable);

    let series = stats::chart_series(&snapshot, 7, today);
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].value, 0, "2026-07-31 has no entry");
    assert_eq!(series[6].value, 5);

    assert_eq!(stats::mood_distribution(&snapshot), [0, 1, 0, 1, 3]);
}

// ============================================
// Conversation session
// ============================================

#[tokio::test]
async fn test_chat_session_round_trip_and_cap() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);

    let mut session = ChatSession::load(
        ReplyEngine::with_rules(RuleResponder::with_seed(21)),
        Arc::clone(&blobs),
    );

    for i in 0..8 {
        let reply = session.send(&format!("checking in, day {}", i)).await.unwrap();
        assert!(!reply.text.is_empty());
        assert!(!reply.degraded);
        assert!(session.history().len() <= HISTORY_CAP);
    }
    assert_eq!(session.history().len(), HISTORY_CAP);
    drop(session);

    // Transcript comes back in order, still capped
    let session = ChatSession::load(
        ReplyEngine::with_rules(RuleResponder::with_seed(21)),
        blobs,
    );
    assert_eq!(session.history().len(), HISTORY_CAP);
    assert_eq!(session.history()[0].role, ChatRole::User);
    assert_eq!(session.history()[0].content, "checking in, day 3");
}

// ============================================
// Export surface
// ============================================

#[test]
fn test_csv_export_of_stored_entries() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);
    let mut entries = EntryStore::load(Arc::clone(&blobs));

    entries
        .add(1, Some("the \"review\" went badly".into()), Some(day("2026-08-01")))
        .unwrap();

    let csv = export::entries_csv(&entries.list());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Date,Mood,Level,Note");
    assert_eq!(
        lines[1],
        "2026-08-01,Very Low,1,\"the \"\"review\"\" went badly\""
    );
}

#[test]
fn test_json_export_combines_profile_and_entries() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);

    let mut profile = ProfileStore::load(Arc::clone(&blobs));
    let mut user = profile.get().clone();
    user.name = "Mira".to_string();
    profile.set(user);

    let mut entries = EntryStore::load(Arc::clone(&blobs));
    entries.add(4, None, Some(day("2026-08-01"))).unwrap();

    let json =
        export::export_json(profile.get(), &entries.list(), chrono::Utc::now()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["profile"]["name"], "Mira");
    assert_eq!(value["mood_entries"][0]["mood"], 4);
    assert_eq!(value["version"], export::EXPORT_VERSION);
}

// ============================================
// Clear-all flow
// ============================================

#[tokio::test]
async fn test_clear_all_data_resets_every_store() {
    let dir = TempDir::new().unwrap();
    let blobs = open_blobs(&dir);

    let mut entries = EntryStore::load(Arc::clone(&blobs));
    let mut profile = ProfileStore::load(Arc::clone(&blobs));
    let mut session = ChatSession::load(
        ReplyEngine::with_rules(RuleResponder::with_seed(2)),
        Arc::clone(&blobs),
    );

    entries.add(3, None, None).unwrap();
    session.send("hello").await.unwrap();
    let mut user = profile.get().clone();
    user.name = "Kai".to_string();
    profile.set(user);

    entries.clear();
    session.clear();
    profile.reset();

    // Nothing should survive a reload
    let entries = EntryStore::load(Arc::clone(&blobs));
    let profile = ProfileStore::load(Arc::clone(&blobs));
    let session = ChatSession::load(
        ReplyEngine::with_rules(RuleResponder::with_seed(2)),
        blobs,
    );

    assert!(entries.is_empty());
    assert!(session.history().is_empty());
    assert_eq!(profile.get().name, "");
}
