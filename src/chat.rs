//! Conversation orchestrator
//!
//! Runs one chat turn: classify the user's text, persist it, pick a reply,
//! persist that, and bump the mood tally.

use crate::db::{Message, MoodTally, NewMessage};
use crate::mood::{self, Classification, MoodLabel};
use crate::store::{SessionStore, StoreError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Canned text shown whenever a turn cannot be completed
pub const GENERIC_RETRY_MESSAGE: &str =
    "I'm having trouble responding right now. Please try again in a moment.";

/// Reply bundle for one user message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub mood: MoodLabel,
    pub confidence: f64,
    pub is_crisis: bool,
}

/// Reasons a turn was aborted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ChatError {
    /// Text safe to show the user; raw errors never reach the transcript
    pub fn user_message(&self) -> &'static str {
        GENERIC_RETRY_MESSAGE
    }
}

impl From<StoreError> for ChatError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SessionNotFound(id) => ChatError::SessionNotFound(id),
            StoreError::Unavailable(msg) => ChatError::StoreUnavailable(msg),
        }
    }
}

/// Ties classifier, reply templates and the store together
pub struct ChatService<S: SessionStore> {
    store: S,
    rng: Mutex<StdRng>,
    history_limit: Option<usize>,
}

impl<S: SessionStore> ChatService<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Deterministic reply selection for reproducible runs and tests
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, rng: StdRng) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
            history_limit: None,
        }
    }

    /// Cap the number of messages returned by [`ChatService::history`]
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Create a session after the user has accepted the disclaimer
    pub async fn start_session(&self) -> Result<String, ChatError> {
        let session = self.store.create_session().await?;
        tracing::info!(session_id = %session.session_id, "Session created");
        Ok(session.session_id)
    }

    /// Handle one user message and produce the bot's reply.
    ///
    /// Failing to find the session or to store either message aborts the turn.
    /// Touching the session and updating the tally are best-effort.
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<ChatReply, ChatError> {
        let session = self.store.get_session(session_id).await?;
        let classification = mood::classify(text);

        if classification.is_crisis {
            tracing::warn!(session_id, "Crisis phrase detected");
        }

        self.store
            .append_message(
                session_id,
                NewMessage::user(text, classification.mood, classification.confidence),
            )
            .await?;

        if let Err(e) = self.store.touch_session(session_id).await {
            tracing::warn!(session_id, error = %e, "Failed to update session activity");
        }

        let response = self.pick_response(classification);

        self.store
            .append_message(session_id, NewMessage::bot(response))
            .await?;

        if let Err(e) = self
            .store
            .increment_mood_tally(session.id, classification.mood)
            .await
        {
            tracing::warn!(
                session_id,
                mood = %classification.mood,
                error = %e,
                "Failed to update mood tally"
            );
        }

        tracing::info!(
            session_id,
            mood = %classification.mood,
            is_crisis = classification.is_crisis,
            "Replied to message"
        );

        Ok(ChatReply {
            response: response.to_string(),
            mood: classification.mood,
            confidence: classification.confidence,
            is_crisis: classification.is_crisis,
        })
    }

    /// Stored messages for the session, oldest first
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        Ok(self.store.get_history(session_id, self.history_limit).await?)
    }

    /// Per-mood counts for the session, most frequent first
    pub async fn mood_summary(&self, session_id: &str) -> Result<Vec<MoodTally>, ChatError> {
        Ok(self.store.get_mood_tallies(session_id).await?)
    }

    fn pick_response(&self, classification: Classification) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        mood::generate(classification.mood, classification.is_crisis, &mut *rng)
    }
}
