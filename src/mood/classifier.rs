//! Keyword classifier
//!
//! Matching is case-insensitive substring search. Crisis phrases are checked
//! first and override every mood keyword.

use super::MoodLabel;
use serde::{Deserialize, Serialize};

/// Confidence recorded for a keyword-classified (or unclassified) message
const KEYWORD_CONFIDENCE: f64 = 0.7;
const CRISIS_CONFIDENCE: f64 = 1.0;

const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "hurt myself",
    "self harm",
    "no reason to live",
    "better off dead",
    "end it all",
    "take my life",
];

/// Mood keyword sets in priority order; the first set with a hit wins.
const MOOD_KEYWORDS: &[(MoodLabel, &[&str])] = &[
    (
        MoodLabel::Happy,
        &["happy", "joy", "great", "wonderful", "excited", "amazing", "good", "glad"],
    ),
    (
        MoodLabel::Sad,
        &["sad", "depressed", "down", "unhappy", "miserable", "crying", "lonely", "hopeless"],
    ),
    (
        MoodLabel::Anxious,
        &["anxious", "anxiety", "nervous", "worried", "panic", "fear", "scared", "overwhelmed"],
    ),
    (
        MoodLabel::Stressed,
        &["stressed", "pressure", "overworked", "exhausted", "tired", "burnt out"],
    ),
    (
        MoodLabel::Angry,
        &["angry", "furious", "mad", "frustrated", "irritated", "annoyed"],
    ),
];

/// Result of classifying one message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub mood: MoodLabel,
    pub is_crisis: bool,
    pub confidence: f64,
}

/// True if the text contains any high-risk phrase
pub fn detect_crisis(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CRISIS_PHRASES)
}

/// Classify a message into a mood and crisis flag
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();

    if contains_any(&lower, CRISIS_PHRASES) {
        return Classification {
            mood: MoodLabel::Crisis,
            is_crisis: true,
            confidence: CRISIS_CONFIDENCE,
        };
    }

    let mood = MOOD_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map_or(MoodLabel::Neutral, |(mood, _)| *mood);

    Classification {
        mood,
        is_crisis: false,
        confidence: KEYWORD_CONFIDENCE,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Keyword list for a mood, if it has one (used by property tests)
#[cfg(test)]
pub(super) fn keywords_for(mood: MoodLabel) -> &'static [&'static str] {
    MOOD_KEYWORDS
        .iter()
        .find(|(m, _)| *m == mood)
        .map_or(&[], |(_, keywords)| keywords)
}

#[cfg(test)]
pub(super) fn crisis_phrases() -> &'static [&'static str] {
    CRISIS_PHRASES
}
