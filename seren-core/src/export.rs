//! User-triggered data exports
//!
//! Two dump formats: a CSV of the mood history and a versioned JSON
//! document combining the profile and the full entry collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::types::{mood_label, MoodEntry, UserProfile};

/// Schema tag written into the JSON dump.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Render the mood history as CSV.
///
/// Header is `Date,Mood,Level,Note`: the Mood column carries the level
/// label, Level the numeric rating. Notes are double-quoted with embedded
/// quotes escaped per the `""` convention.
pub fn entries_csv(entries: &[MoodEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push("Date,Mood,Level,Note".to_string());

    for entry in entries {
        let note = entry.note.as_deref().unwrap_or("").replace('"', "\"\"");
        lines.push(format!(
            "{},{},{},\"{}\"",
            entry.date,
            mood_label(entry.mood),
            entry.mood,
            note
        ));
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    profile: &'a UserProfile,
    mood_entries: &'a [MoodEntry],
    export_date: String,
    version: &'static str,
}

/// Render the combined profile + entries dump as pretty JSON.
pub fn export_json(
    profile: &UserProfile,
    entries: &[MoodEntry],
    now: DateTime<Utc>,
) -> Result<String> {
    let document = ExportDocument {
        profile,
        mood_entries: entries,
        export_date: now.to_rfc3339(),
        version: EXPORT_VERSION,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(date: &str, mood: u8, note: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: "test".to_string(),
            date: date.parse::<NaiveDate>().unwrap(),
            mood,
            note: note.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let entries = vec![
            entry("2026-08-05", 4, Some("quiet day")),
            entry("2026-08-04", 1, None),
        ];
        let csv = entries_csv(&entries);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Mood,Level,Note");
        assert_eq!(lines[1], "2026-08-05,Good,4,\"quiet day\"");
        assert_eq!(lines[2], "2026-08-04,Very Low,1,\"\"");
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let entries = vec![entry("2026-08-05", 3, Some("felt \"off\" all day"))];
        let csv = entries_csv(&entries);

        assert!(csv.contains("\"felt \"\"off\"\" all day\""));

        // Recoverable by standard CSV unquoting
        let field = csv
            .lines()
            .nth(1)
            .and_then(|l| l.split_once(",3,"))
            .map(|(_, note)| note)
            .unwrap();
        let unquoted = field
            .trim_matches('"')
            .replace("\"\"", "\"");
        assert_eq!(unquoted, "felt \"off\" all day");
    }

    #[test]
    fn test_json_dump_fields() {
        let profile = UserProfile::default();
        let entries = vec![entry("2026-08-05", 4, Some("ok"))];
        let now = Utc::now();

        let json = export_json(&profile, &entries, now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], EXPORT_VERSION);
        assert_eq!(value["profile"]["id"], "default-user");
        assert_eq!(value["mood_entries"].as_array().unwrap().len(), 1);
        assert_eq!(value["export_date"], now.to_rfc3339());
    }
}
