//! Chat widget state types

use crate::db::Direction;
use crate::mood::MoodLabel;
use serde::{Deserialize, Serialize};

/// Lifecycle of one browser tab's chat
///
/// `Uninitialized -> AwaitingDisclaimer -> SessionActive`; the last is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Page not yet shown
    #[default]
    Uninitialized,

    /// Disclaimer gate is up
    AwaitingDisclaimer {
        /// Disclaimer accepted, session creation in flight
        #[serde(default)]
        creating_session: bool,
    },

    /// Session exists and the chat is usable
    SessionActive {
        session_id: String,
        /// A message was sent and its reply has not arrived
        #[serde(default)]
        awaiting_reply: bool,
    },
}

impl ChatState {
    /// Input must be blocked while a request chain is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ChatState::AwaitingDisclaimer {
                creating_session: true
            } | ChatState::SessionActive {
                awaiting_reply: true,
                ..
            }
        )
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            ChatState::SessionActive { session_id, .. } => Some(session_id),
            _ => None,
        }
    }
}

/// One line in the in-tab transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub sender: Direction,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodLabel>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Direction::User,
            text: text.into(),
            mood: None,
        }
    }

    pub fn bot(text: impl Into<String>, mood: Option<MoodLabel>) -> Self {
        Self {
            sender: Direction::Bot,
            text: text.into(),
            mood,
        }
    }
}
