//! Core domain types for seren
//!
//! These types model the journal's data: mood entries logged once per day,
//! derived statistics, the chat transcript, and the user profile. Derived
//! values ([`MoodStats`], [`ChartPoint`]) are never persisted; they are
//! recomputed from the entry collection on every change.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lowest valid mood rating.
pub const MOOD_MIN: u8 = 1;
/// Highest valid mood rating.
pub const MOOD_MAX: u8 = 5;
/// Maximum note length accepted at creation or update.
pub const NOTE_MAX_CHARS: usize = 500;

// ============================================
// Mood entries
// ============================================

/// One mood log record for a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Calendar date the entry is for (day granularity)
    pub date: NaiveDate,
    /// Mood rating, always within [`MOOD_MIN`]..=[`MOOD_MAX`]
    pub mood: u8,
    /// Optional free-text annotation
    pub note: Option<String>,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Check a mood rating against the valid range.
pub fn validate_mood(mood: u8) -> crate::error::Result<()> {
    if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
        return Err(crate::error::Error::Validation(format!(
            "mood must be between {} and {}, got {}",
            MOOD_MIN, MOOD_MAX, mood
        )));
    }
    Ok(())
}

/// Check a note against the length bound.
pub fn validate_note(note: &str) -> crate::error::Result<()> {
    let chars = note.chars().count();
    if chars > NOTE_MAX_CHARS {
        return Err(crate::error::Error::Validation(format!(
            "note must be at most {} characters, got {}",
            NOTE_MAX_CHARS, chars
        )));
    }
    Ok(())
}

/// Display label for a mood rating (1 = "Very Low" .. 5 = "Very High").
pub fn mood_label(mood: u8) -> &'static str {
    match mood {
        1 => "Very Low",
        2 => "Low",
        3 => "Neutral",
        4 => "Good",
        5 => "Very High",
        _ => "Unknown",
    }
}

/// Emoji for a mood rating, for compact list rendering.
pub fn mood_emoji(mood: u8) -> &'static str {
    match mood {
        1 => "😢",
        2 => "😕",
        3 => "😐",
        4 => "🙂",
        5 => "😊",
        _ => "·",
    }
}

// ============================================
// Derived statistics
// ============================================

/// Direction of the recent-week vs prior-week mood comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl MoodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "improving",
            MoodTrend::Declining => "declining",
            MoodTrend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MoodTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improving" => Ok(MoodTrend::Improving),
            "declining" => Ok(MoodTrend::Declining),
            "stable" => Ok(MoodTrend::Stable),
            _ => Err(format!("unknown mood trend: {}", s)),
        }
    }
}

/// Aggregate metrics derived from the entry collection.
///
/// Never stored; recomputed whenever the collection changes. An
/// `average_mood` of 0.0 is the empty-collection sentinel, not a rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStats {
    /// Arithmetic mean of all ratings, rounded to 1 decimal; 0.0 when empty
    pub average_mood: f64,
    /// Number of entries in the collection
    pub total_entries: usize,
    /// Recent-week vs prior-week classification
    pub trend: MoodTrend,
    /// Consecutive most-recent days with mood >= 4
    pub streak: usize,
}

impl Default for MoodStats {
    fn default() -> Self {
        Self {
            average_mood: 0.0,
            total_entries: 0,
            trend: MoodTrend::Stable,
            streak: 0,
        }
    }
}

/// One chart point per calendar day in a requested window.
///
/// A `value` of 0 means "no entry that day" and must be rendered as a gap,
/// never as a very low mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Human-readable date label (e.g. "Mon Aug 4")
    pub label: String,
    /// Mood 1-5, or 0 when no entry exists for the day
    pub value: u8,
}

// ============================================
// Chat
// ============================================

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message in the rolling conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque unique identifier
    pub id: String,
    /// Message text
    pub content: String,
    /// Author role
    pub role: ChatRole,
    /// When the message was exchanged
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh id, timestamped now.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

// ============================================
// User profile
// ============================================

/// UI language for label lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// User-tunable preferences stored with the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub daily_reminders: bool,
    pub weekly_insights: bool,
    pub ai_suggestions: bool,
    pub language: Language,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            daily_reminders: true,
            weekly_insights: true,
            ai_suggestions: true,
            language: Language::En,
            theme: Theme::Light,
        }
    }
}

/// The single local user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub preferences: Preferences,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "default-user".to_string(),
            name: String::new(),
            email: String::new(),
            created_at: Utc::now(),
            preferences: Preferences::default(),
        }
    }
}
