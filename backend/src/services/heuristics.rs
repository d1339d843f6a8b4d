//! Human-readable reports derived from entry collections.
//!
//! Every function here is pure: same input, same text.

use std::collections::HashSet;

use chrono::Datelike;

use super::aggregate::average_daily_index;
use crate::models::analytics::MoodAnalyticsRow;
use crate::models::entry::JournalEntry;
use crate::models::mood::{Mood, MoodSummary};

pub const NO_ENTRIES_REPORT: &str = "No journal entries were recorded this month. Consider establishing a regular journaling routine to track your emotional wellness.";
pub const JOURNEY_BEGINNING_REVIEW: &str =
    "This year marks the beginning of your journaling journey with Solace.";
pub const JOURNEY_BEGINNING_MOOD: &str =
    "Your mood journey is just beginning. Here's to many more insights ahead!";

pub fn wellness_report(summary: &MoodSummary) -> String {
    let total = summary.total();
    let Some(dominant) = summary.dominant() else {
        return NO_ENTRIES_REPORT.to_string();
    };

    let noun = if total == 1 { "entry" } else { "entries" };
    let tail = match dominant {
        Mood::Happy => "Your emotional state was predominantly positive, with many happy moments recorded. This suggests good emotional wellness and life satisfaction.",
        Mood::Sad => "You experienced more challenging emotions this month. Remember that difficult periods are temporary and part of personal growth.",
        Mood::Neutral => "You maintained emotional balance this month, experiencing a healthy mix of different emotions.",
    };
    format!("This month you made {total} journal {noun}. {tail}")
}

struct InsightInput {
    average_word_count: f64,
    distinct_moods: usize,
}

struct InsightRule {
    applies: fn(&InsightInput) -> bool,
    message: &'static str,
}

fn writes_in_detail(input: &InsightInput) -> bool {
    input.average_word_count > 100.0
}

fn single_mood(input: &InsightInput) -> bool {
    input.distinct_moods == 1
}

fn full_range(input: &InsightInput) -> bool {
    input.distinct_moods == Mood::ALL.len()
}

/// Evaluated independently, in this order.
const INSIGHT_RULES: [InsightRule; 3] = [
    InsightRule {
        applies: writes_in_detail,
        message: "You've been expressing yourself in detail, showing deep self-reflection",
    },
    InsightRule {
        applies: single_mood,
        message: "Your emotional state was consistent throughout the month",
    },
    InsightRule {
        applies: full_range,
        message: "You experienced a full range of emotions, showing emotional awareness",
    },
];

pub fn key_insights(entries: &[JournalEntry]) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let total_words: i64 = entries.iter().map(|e| i64::from(e.word_count.max(0))).sum();
    let input = InsightInput {
        average_word_count: total_words as f64 / entries.len() as f64,
        distinct_moods: entries.iter().map(|e| e.mood).collect::<HashSet<_>>().len(),
    };

    INSIGHT_RULES
        .iter()
        .filter(|rule| (rule.applies)(&input))
        .map(|rule| rule.message.to_string())
        .collect()
}

pub fn achievements_summary(entries: &[JournalEntry]) -> String {
    let happy = entries.iter().filter(|e| e.mood == Mood::Happy).count();
    format!(
        "You've written {} journal entries and captured {} happy moments this year!",
        entries.len(),
        happy
    )
}

/// Entries created during calendar `year` (UTC). Later-dated rows are not counted.
pub fn year_in_review(entries: &[JournalEntry], year: i32) -> String {
    let summary = MoodSummary::from_moods(
        entries
            .iter()
            .filter(|e| e.created_at.year() == year)
            .map(|e| e.mood),
    );
    if summary.total() == 0 {
        return JOURNEY_BEGINNING_REVIEW.to_string();
    }

    format!(
        "This year you've shared {} entries with {} happy moments, {} reflective times, and {} challenging periods that helped you grow.",
        summary.total(),
        summary.happy,
        summary.neutral,
        summary.sad
    )
}

pub fn mood_journey_summary(rows: &[MoodAnalyticsRow]) -> String {
    match average_daily_index(rows) {
        Some(average) => format!(
            "Your happiness index averages {average:.1}/10, showing your resilience and capacity for joy throughout your journey."
        ),
        None => JOURNEY_BEGINNING_MOOD.to_string(),
    }
}

pub fn birthday_message(full_name: &str) -> String {
    format!(
        "Happy Birthday, {full_name}! Another year of growth, reflection, and beautiful moments captured in your journal."
    )
}

/// Short reflection for a month view.
pub fn monthly_reflection(summary: &MoodSummary) -> String {
    let total = summary.total();
    match summary.dominant() {
        None => "You didn't make any journal entries this month. Would you like to start a journaling habit?".to_string(),
        Some(Mood::Happy) => format!(
            "This was a positive month for you! You logged {total} entries, with happiness being your most frequent emotion. The good moments outweighed the challenging ones."
        ),
        Some(Mood::Sad) => format!(
            "This month had its challenges. You logged {total} entries, with more difficult emotions appearing frequently. Remember that it's okay to have tough periods, they're part of the journey."
        ),
        Some(Mood::Neutral) => format!(
            "This was a balanced month. You logged {total} entries with a mix of emotions. Finding equilibrium is an achievement worth noting."
        ),
    }
}
