//! Mood statistics and trend derivation
//!
//! Pure functions over a snapshot of the entry collection. Every function
//! that depends on "today" takes it as a parameter so results are
//! deterministic; callers inject the local wall-clock date.

use chrono::{Duration, NaiveDate};

use crate::types::{ChartPoint, MoodEntry, MoodStats, MoodTrend};

/// Difference between weekly means required to leave the `Stable` band.
const TREND_THRESHOLD: f64 = 0.2;

/// Mood floor for the streak walk.
const STREAK_FLOOR: u8 = 4;

/// How many triggers [`top_triggers`] returns at most.
const TOP_TRIGGER_COUNT: usize = 5;

/// Fixed vocabulary of wellness-related keywords matched against notes on
/// low-mood entries.
const TRIGGER_VOCABULARY: &[&str] = &[
    "work",
    "stress",
    "tired",
    "anxious",
    "worried",
    "overwhelmed",
    "sad",
    "angry",
    "frustrated",
    "lonely",
    "sleep",
    "health",
];

/// Derive aggregate statistics from the entry collection.
///
/// An empty collection yields the sentinel stats: average 0.0, stable
/// trend, zero streak.
pub fn calculate_stats(entries: &[MoodEntry], today: NaiveDate) -> MoodStats {
    if entries.is_empty() {
        return MoodStats::default();
    }

    let total: u32 = entries.iter().map(|e| e.mood as u32).sum();
    let average_mood = round1(total as f64 / entries.len() as f64);

    MoodStats {
        average_mood,
        total_entries: entries.len(),
        trend: trend(entries, today),
        streak: streak(entries),
    }
}

/// Classify the recent week against the prior week.
///
/// Recent: date >= today-7. Previous: today-14 <= date < today-7. If either
/// partition is empty the trend is `Stable`; sparse data is not an error.
fn trend(entries: &[MoodEntry], today: NaiveDate) -> MoodTrend {
    let week_ago = today - Duration::days(7);
    let two_weeks_ago = today - Duration::days(14);

    let recent: Vec<u8> = entries
        .iter()
        .filter(|e| e.date >= week_ago)
        .map(|e| e.mood)
        .collect();
    let previous: Vec<u8> = entries
        .iter()
        .filter(|e| e.date >= two_weeks_ago && e.date < week_ago)
        .map(|e| e.mood)
        .collect();

    if recent.is_empty() || previous.is_empty() {
        return MoodTrend::Stable;
    }

    let recent_avg = mean(&recent);
    let previous_avg = mean(&previous);
    let difference = recent_avg - previous_avg;

    if difference > TREND_THRESHOLD {
        MoodTrend::Improving
    } else if difference < -TREND_THRESHOLD {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

/// Count consecutive most-recent days with mood >= 4.
///
/// Walks the entries date-descending and stops at the first rating below
/// the floor. Same-date ordering is whatever the stable sort preserves.
fn streak(entries: &[MoodEntry]) -> usize {
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .iter()
        .take_while(|e| e.mood >= STREAK_FLOOR)
        .count()
}

/// Build one chart point per calendar day for a window of `days` ending
/// `today` (both ends inclusive).
///
/// Days without an entry get the 0 sentinel. The series length always
/// equals `days` regardless of entry sparsity.
pub fn chart_series(entries: &[MoodEntry], days: u32, today: NaiveDate) -> Vec<ChartPoint> {
    if days == 0 {
        return Vec::new();
    }

    let start = today - Duration::days(days as i64 - 1);
    start
        .iter_days()
        .take(days as usize)
        .map(|date| ChartPoint {
            label: date.format("%a %b %-d").to_string(),
            value: entries
                .iter()
                .find(|e| e.date == date)
                .map(|e| e.mood)
                .unwrap_or(0),
        })
        .collect()
}

/// Count entries per mood level. All five levels are always present,
/// zero-filled; index 0 holds the count for mood 1.
pub fn mood_distribution(entries: &[MoodEntry]) -> [u32; 5] {
    let mut distribution = [0u32; 5];
    for entry in entries {
        if (1..=5).contains(&entry.mood) {
            distribution[entry.mood as usize - 1] += 1;
        }
    }
    distribution
}

/// Extract the most frequent trigger keywords from low-mood notes.
///
/// Considers entries with mood <= 2 and a non-empty note, tokenizes on
/// non-word boundaries, and matches case-insensitively against the fixed
/// vocabulary. Returns at most five `(word, count)` pairs by descending
/// count; equal counts keep first-seen order (stable sort).
pub fn top_triggers(entries: &[MoodEntry]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for entry in entries.iter().filter(|e| e.mood <= 2) {
        let Some(note) = entry.note.as_deref() else {
            continue;
        };
        let lowered = note.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric() && c != '_') {
            if token.is_empty() || !TRIGGER_VOCABULARY.contains(&token) {
                continue;
            }
            match counts.iter_mut().find(|(word, _)| word.as_str() == token) {
                Some((_, count)) => *count += 1,
                None => counts.push((token.to_string(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_TRIGGER_COUNT);
    counts
}

/// Encouragement line for the dashboard, keyed off the average mood.
pub fn mood_message(average_mood: f64) -> &'static str {
    if average_mood >= 4.5 {
        "You're doing amazing! Keep up the great work!"
    } else if average_mood >= 3.5 {
        "You're on a positive track!"
    } else if average_mood >= 2.5 {
        "Some ups and downs - that's completely normal."
    } else if average_mood >= 1.5 {
        "Going through a tough time? Remember, it's okay to seek support."
    } else {
        "You're being so brave by tracking your feelings. Every small step counts."
    }
}

fn mean(moods: &[u8]) -> f64 {
    moods.iter().map(|&m| m as u32).sum::<u32>() as f64 / moods.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(date: &str, mood: u8, note: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: day(date),
            mood,
            note: note.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const TODAY: &str = "2026-08-06";

    #[test]
    fn test_empty_collection_sentinel() {
        let stats = calculate_stats(&[], day(TODAY));
        assert_eq!(stats, MoodStats::default());
        assert_eq!(stats.average_mood, 0.0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.trend, MoodTrend::Stable);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let entries: Vec<MoodEntry> = [1, 2, 3, 4, 5]
            .iter()
            .enumerate()
            .map(|(i, &m)| entry(&format!("2026-08-0{}", i + 1), m, None))
            .collect();
        assert_eq!(calculate_stats(&entries, day(TODAY)).average_mood, 3.0);

        // 2 + 2 + 3 = 7/3 = 2.333... -> 2.3
        let entries = vec![
            entry("2026-08-01", 2, None),
            entry("2026-08-02", 2, None),
            entry("2026-08-03", 3, None),
        ];
        assert_eq!(calculate_stats(&entries, day(TODAY)).average_mood, 2.3);
    }

    #[test]
    fn test_streak_stops_below_floor() {
        // By recency: 5, 5, 4, 2, 5 => streak of 3
        let entries = vec![
            entry("2026-08-06", 5, None),
            entry("2026-08-05", 5, None),
            entry("2026-08-04", 4, None),
            entry("2026-08-03", 2, None),
            entry("2026-08-02", 5, None),
        ];
        assert_eq!(calculate_stats(&entries, day(TODAY)).streak, 3);
    }

    #[test]
    fn test_streak_unordered_input() {
        // Same data shuffled; streak sorts by date itself
        let entries = vec![
            entry("2026-08-03", 2, None),
            entry("2026-08-06", 5, None),
            entry("2026-08-02", 5, None),
            entry("2026-08-04", 4, None),
            entry("2026-08-05", 5, None),
        ];
        assert_eq!(calculate_stats(&entries, day(TODAY)).streak, 3);
    }

    #[test]
    fn test_trend_improving_and_declining() {
        // Recent week mean 4.0 vs previous week mean 3.5 => improving
        let entries = vec![
            entry("2026-08-05", 4, None),
            entry("2026-08-04", 4, None),
            entry("2026-07-28", 4, None),
            entry("2026-07-27", 3, None),
        ];
        assert_eq!(
            calculate_stats(&entries, day(TODAY)).trend,
            MoodTrend::Improving
        );

        // Mirror image => declining
        let entries = vec![
            entry("2026-08-05", 4, None),
            entry("2026-08-04", 3, None),
            entry("2026-07-28", 4, None),
            entry("2026-07-27", 4, None),
        ];
        assert_eq!(
            calculate_stats(&entries, day(TODAY)).trend,
            MoodTrend::Declining
        );
    }

    #[test]
    fn test_trend_within_threshold_is_stable() {
        // 3.6 vs 3.5 => difference 0.1 < 0.2 => stable
        let entries = vec![
            entry("2026-08-05", 4, None),
            entry("2026-08-04", 4, None),
            entry("2026-08-03", 4, None),
            entry("2026-08-02", 3, None),
            entry("2026-08-01", 3, None),
            entry("2026-07-28", 4, None),
            entry("2026-07-27", 3, None),
        ];
        assert_eq!(
            calculate_stats(&entries, day(TODAY)).trend,
            MoodTrend::Stable
        );
    }

    #[test]
    fn test_trend_stable_when_partition_empty() {
        // Only recent entries: previous week empty => stable by default
        let entries = vec![
            entry("2026-08-05", 5, None),
            entry("2026-08-04", 5, None),
        ];
        assert_eq!(
            calculate_stats(&entries, day(TODAY)).trend,
            MoodTrend::Stable
        );
    }

    #[test]
    fn test_chart_series_fills_missing_days() {
        let entries = vec![
            entry("2026-08-04", 3, None),
            entry("2026-08-06", 5, None),
        ];
        let series = chart_series(&entries, 3, day(TODAY));

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].value, 3);
        assert_eq!(series[1].value, 0, "missing day uses the 0 sentinel");
        assert_eq!(series[2].value, 5);
    }

    #[test]
    fn test_chart_series_length_matches_window() {
        let series = chart_series(&[], 7, day(TODAY));
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.value == 0));
        assert_eq!(chart_series(&[], 0, day(TODAY)).len(), 0);
    }

    #[test]
    fn test_chart_labels() {
        let series = chart_series(&[], 1, day("2026-08-06"));
        assert_eq!(series[0].label, "Thu Aug 6");
    }

    #[test]
    fn test_distribution_zero_fills_all_levels() {
        let entries = vec![
            entry("2026-08-01", 2, None),
            entry("2026-08-02", 2, None),
            entry("2026-08-03", 5, None),
        ];
        assert_eq!(mood_distribution(&entries), [0, 2, 0, 0, 1]);
        assert_eq!(mood_distribution(&[]), [0; 5]);
    }

    #[test]
    fn test_top_triggers_counts_and_order() {
        let entries = vec![
            entry("2026-08-01", 1, Some("so tired from work")),
            entry("2026-08-02", 2, Some("work stress again")),
        ];
        let triggers = top_triggers(&entries);

        assert_eq!(triggers[0], ("work".to_string(), 2));
        // Ties keep first-seen order: "tired" was seen before "stress"
        assert_eq!(triggers[1], ("tired".to_string(), 1));
        assert_eq!(triggers[2], ("stress".to_string(), 1));
    }

    #[test]
    fn test_top_triggers_ignores_good_moods_and_missing_notes() {
        let entries = vec![
            entry("2026-08-01", 4, Some("work work work")),
            entry("2026-08-02", 1, None),
            entry("2026-08-03", 2, Some("lonely evening")),
        ];
        let triggers = top_triggers(&entries);
        assert_eq!(triggers, vec![("lonely".to_string(), 1)]);
    }

    #[test]
    fn test_top_triggers_caps_at_five() {
        let entries = vec![entry(
            "2026-08-01",
            1,
            Some("work stress tired anxious worried overwhelmed sad"),
        )];
        assert_eq!(top_triggers(&entries).len(), 5);
    }

    #[test]
    fn test_top_triggers_case_insensitive_tokenization() {
        let entries = vec![entry("2026-08-01", 1, Some("WORK, work; Work!"))];
        assert_eq!(top_triggers(&entries), vec![("work".to_string(), 3)]);
    }

    #[test]
    fn test_mood_message_thresholds() {
        assert!(mood_message(4.5).contains("amazing"));
        assert!(mood_message(3.5).contains("positive track"));
        assert!(mood_message(2.5).contains("ups and downs"));
        assert!(mood_message(1.5).contains("seek support"));
        assert!(mood_message(0.5).contains("brave"));
    }
}
