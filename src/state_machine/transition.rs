//! Pure state transition function

use super::{ChatState, Effect, Event};
use crate::chat::GENERIC_RETRY_MESSAGE;
use crate::mood::MoodLabel;
use thiserror::Error;

/// First bot line shown once the session exists
pub const WELCOME_MESSAGE: &str = "Hello! I'm here to listen and support you. How are you feeling today? Feel free to share what's on your mind - this is a safe space.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in flight")]
    Busy,
    #[error("No active session (accept the disclaimer first)")]
    NoSession,
    #[error("Disclaimer already accepted")]
    DisclaimerAlreadyAccepted,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same state and event it always yields the same result; all I/O
/// is requested through the returned effects.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Disclaimer Gate
        // ============================================================
        (ChatState::Uninitialized, Event::PageLoaded) => Ok(TransitionResult::new(
            ChatState::AwaitingDisclaimer {
                creating_session: false,
            },
        )),

        (
            ChatState::AwaitingDisclaimer {
                creating_session: false,
            },
            Event::DisclaimerAccepted,
        ) => Ok(TransitionResult::new(ChatState::AwaitingDisclaimer {
            creating_session: true,
        })
        .with_effect(Effect::CreateSession)),

        (
            ChatState::AwaitingDisclaimer {
                creating_session: true,
            },
            Event::DisclaimerAccepted,
        ) => Err(TransitionError::Busy),

        (ChatState::SessionActive { .. }, Event::DisclaimerAccepted) => {
            Err(TransitionError::DisclaimerAlreadyAccepted)
        }

        (
            ChatState::AwaitingDisclaimer {
                creating_session: true,
            },
            Event::SessionCreated { session_id },
        ) => Ok(TransitionResult::new(ChatState::SessionActive {
            session_id,
            awaiting_reply: false,
        })
        .with_effect(Effect::bot_entry(WELCOME_MESSAGE, Some(MoodLabel::Neutral)))),

        // Gate stays up so the user can accept again
        (
            ChatState::AwaitingDisclaimer {
                creating_session: true,
            },
            Event::SessionFailed { error },
        ) => Ok(TransitionResult::new(ChatState::AwaitingDisclaimer {
            creating_session: false,
        })
        .with_effect(Effect::bot_entry(error.user_message(), None))),

        // ============================================================
        // Messaging
        // ============================================================
        (
            ChatState::SessionActive {
                session_id,
                awaiting_reply: false,
            },
            Event::MessageSubmitted { text },
        ) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(TransitionResult::new(ChatState::SessionActive {
                session_id: session_id.clone(),
                awaiting_reply: true,
            })
            .with_effect(Effect::user_entry(text))
            .with_effect(Effect::SendMessage {
                session_id: session_id.clone(),
                text: text.to_string(),
            }))
        }

        (
            ChatState::SessionActive {
                awaiting_reply: true,
                ..
            },
            Event::MessageSubmitted { .. },
        ) => Err(TransitionError::Busy),

        (ChatState::Uninitialized | ChatState::AwaitingDisclaimer { .. }, Event::MessageSubmitted { .. }) => {
            Err(TransitionError::NoSession)
        }

        (
            ChatState::SessionActive {
                session_id,
                awaiting_reply: true,
            },
            Event::ReplyReceived { reply },
        ) => {
            let mut result = TransitionResult::new(ChatState::SessionActive {
                session_id: session_id.clone(),
                awaiting_reply: false,
            })
            .with_effect(Effect::bot_entry(reply.response, Some(reply.mood)));
            if reply.is_crisis {
                result = result.with_effect(Effect::RaiseCrisisBanner);
            }
            Ok(result)
        }

        // Banner is left exactly as it was
        (
            ChatState::SessionActive {
                session_id,
                awaiting_reply: true,
            },
            Event::ReplyFailed { error },
        ) => Ok(TransitionResult::new(ChatState::SessionActive {
            session_id: session_id.clone(),
            awaiting_reply: false,
        })
        .with_effect(Effect::bot_entry(error.user_message(), None))),

        // ============================================================
        // Everything else
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} in state {state:?}"
        ))),
    }
}
