//! Effects produced by state transitions

use super::state::TranscriptEntry;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Create the backing session
    CreateSession,

    /// Run one chat turn
    SendMessage { session_id: String, text: String },

    /// Append a line to the visible transcript
    AppendEntry(TranscriptEntry),

    /// Show the crisis banner; it stays up for the rest of the tab's life
    RaiseCrisisBanner,
}

impl Effect {
    pub fn user_entry(text: impl Into<String>) -> Self {
        Effect::AppendEntry(TranscriptEntry::user(text))
    }

    pub fn bot_entry(text: impl Into<String>, mood: Option<crate::mood::MoodLabel>) -> Self {
        Effect::AppendEntry(TranscriptEntry::bot(text, mood))
    }
}
