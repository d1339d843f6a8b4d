//! Keyword-based analysis used when the analysis service is unavailable
//! for a text entry. Deterministic for a given input.

use super::TextAnalysis;
use crate::models::mood::Mood;

const HAPPY_WORDS: [&str; 9] = [
    "happy", "joy", "excited", "great", "wonderful", "love", "awesome", "good", "smile",
];
const SAD_WORDS: [&str; 9] = [
    "sad", "upset", "depressed", "unhappy", "terrible", "bad", "worried", "anxious", "stress",
];

const SUMMARY_WORDS: usize = 15;

pub fn keyword_analysis(text: &str) -> TextAnalysis {
    let lower = text.to_lowercase();
    let happy = HAPPY_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let sad = SAD_WORDS.iter().filter(|w| lower.contains(*w)).count();

    let (mood, response) = if happy > sad {
        (
            Mood::Happy,
            "I'm glad to see you're in good spirits! It's wonderful that you're experiencing positive moments. Remember to savor these feelings and the little joys that brought them about. Is there something specific from today you'd like to celebrate?",
        )
    } else if sad > happy {
        (
            Mood::Sad,
            "I notice you might be feeling down. That's completely okay, all emotions are valid and temporary. Remember to be gentle with yourself during difficult moments. Would it help to focus on one small positive thing, however tiny, from today?",
        )
    } else {
        (
            Mood::Neutral,
            "Thanks for sharing your thoughts. It sounds like you're having a balanced day. Taking time to reflect like this is a healthy practice. Is there anything specific you'd like to explore about how you're feeling?",
        )
    };

    TextAnalysis {
        mood,
        response: response.to_string(),
        summary: summarize(text),
        highlights: highlights(text),
        happiness_score: None,
    }
}

fn summarize(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > SUMMARY_WORDS {
        format!("{}...", words[..SUMMARY_WORDS].join(" "))
    } else {
        text.trim().to_string()
    }
}

/// First and last sentence, or every sentence when there are at most two.
fn highlights(text: &str) -> Vec<String> {
    let sentences: Vec<String> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if sentences.len() > 2 {
        let last = sentences.len() - 1;
        vec![sentences[0].clone(), sentences[last].clone()]
    } else {
        sentences
    }
}
