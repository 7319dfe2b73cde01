//! Mood and crisis classification
//!
//! Keyword-driven classification of user messages and selection of the
//! scripted reply for the detected mood.

mod classifier;
mod responses;

#[cfg(test)]
mod proptests;

pub use classifier::{classify, detect_crisis, Classification};
pub use responses::{generate, templates_for, CRISIS_RESPONSE};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of mood labels a message can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Happy,
    Sad,
    Anxious,
    Stressed,
    Angry,
    Crisis,
    Neutral,
}

impl MoodLabel {
    /// Every label, in declaration order
    pub const ALL: [MoodLabel; 7] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Stressed,
        MoodLabel::Angry,
        MoodLabel::Crisis,
        MoodLabel::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Angry => "angry",
            MoodLabel::Crisis => "crisis",
            MoodLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodLabel::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| format!("Unknown mood label: {s}"))
    }
}
