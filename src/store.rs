//! Session store abstraction
//!
//! The orchestrator talks to persistence only through [`SessionStore`], which
//! lets tests swap in a mock that can simulate outages.

#[cfg(test)]
pub mod testing;

use crate::db::{Database, DbError, Message, MoodTally, NewMessage, Session};
use crate::mood::MoodLabel;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Store failure, split by whether retrying could help
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::SessionNotFound(id) => StoreError::SessionNotFound(id),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for sessions, messages and mood tallies
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session with a freshly generated identifier
    async fn create_session(&self) -> StoreResult<Session>;

    /// Resolve a public session identifier
    async fn get_session(&self, session_id: &str) -> StoreResult<Session>;

    /// Append a message to the session named by its public identifier
    async fn append_message(
        &self,
        session_id: &str,
        message: NewMessage<'_>,
    ) -> StoreResult<Message>;

    /// Update the session's last-active timestamp
    async fn touch_session(&self, session_id: &str) -> StoreResult<()>;

    /// Increment the (session, mood) tally by one
    async fn increment_mood_tally(&self, session: i64, mood: MoodLabel) -> StoreResult<MoodTally>;

    /// Session history, oldest first, at most `limit` messages
    async fn get_history(&self, session_id: &str, limit: Option<usize>)
        -> StoreResult<Vec<Message>>;

    /// Mood tallies for the session, most frequent first
    async fn get_mood_tallies(&self, session_id: &str) -> StoreResult<Vec<MoodTally>>;
}

// ============================================================================
// Arc implementation for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn create_session(&self) -> StoreResult<Session> {
        (**self).create_session().await
    }

    async fn get_session(&self, session_id: &str) -> StoreResult<Session> {
        (**self).get_session(session_id).await
    }

    async fn append_message(
        &self,
        session_id: &str,
        message: NewMessage<'_>,
    ) -> StoreResult<Message> {
        (**self).append_message(session_id, message).await
    }

    async fn touch_session(&self, session_id: &str) -> StoreResult<()> {
        (**self).touch_session(session_id).await
    }

    async fn increment_mood_tally(&self, session: i64, mood: MoodLabel) -> StoreResult<MoodTally> {
        (**self).increment_mood_tally(session, mood).await
    }

    async fn get_history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Message>> {
        (**self).get_history(session_id, limit).await
    }

    async fn get_mood_tallies(&self, session_id: &str) -> StoreResult<Vec<MoodTally>> {
        (**self).get_mood_tallies(session_id).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use Database as a `SessionStore`
#[derive(Clone)]
pub struct DatabaseStore {
    db: Database,
}

impl DatabaseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Log a store failure before handing it back to the caller
fn logged<T>(op: &'static str, result: Result<T, DbError>) -> StoreResult<T> {
    result.map_err(|e| {
        let err = StoreError::from(e);
        match &err {
            StoreError::SessionNotFound(id) => {
                tracing::debug!(op, session_id = %id, "Session not found");
            }
            StoreError::Unavailable(msg) => {
                tracing::error!(op, error = %msg, "Store operation failed");
            }
        }
        err
    })
}

#[async_trait]
impl SessionStore for DatabaseStore {
    async fn create_session(&self) -> StoreResult<Session> {
        let session_id = uuid::Uuid::new_v4().to_string();
        logged("create_session", self.db.create_session(&session_id))
    }

    async fn get_session(&self, session_id: &str) -> StoreResult<Session> {
        logged("get_session", self.db.get_session(session_id))
    }

    async fn append_message(
        &self,
        session_id: &str,
        message: NewMessage<'_>,
    ) -> StoreResult<Message> {
        let session = logged("append_message", self.db.get_session(session_id))?;
        logged("append_message", self.db.add_message(session.id, &message))
    }

    async fn touch_session(&self, session_id: &str) -> StoreResult<()> {
        logged("touch_session", self.db.touch_session(session_id))
    }

    async fn increment_mood_tally(&self, session: i64, mood: MoodLabel) -> StoreResult<MoodTally> {
        logged(
            "increment_mood_tally",
            self.db.increment_mood_tally(session, mood),
        )
    }

    async fn get_history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Message>> {
        let session = logged("get_history", self.db.get_session(session_id))?;
        logged("get_history", self.db.get_messages(session.id, limit))
    }

    async fn get_mood_tallies(&self, session_id: &str) -> StoreResult<Vec<MoodTally>> {
        let session = logged("get_mood_tallies", self.db.get_session(session_id))?;
        logged("get_mood_tallies", self.db.get_mood_tallies(session.id))
    }
}
