//! Mock store for testing
//!
//! Keeps everything in memory and can be told to fail individual operations
//! to simulate an unreachable backend.

use super::{SessionStore, StoreError, StoreResult};
use crate::db::{Message, MoodTally, NewMessage, Session};
use crate::mood::MoodLabel;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    CreateSession,
    GetSession,
    AppendMessage,
    TouchSession,
    IncrementTally,
    GetHistory,
    GetTallies,
}

#[derive(Default)]
struct Inner {
    sessions: Vec<Session>,
    messages: Vec<Message>,
    tallies: HashMap<(i64, MoodLabel), MoodTally>,
    failing: HashSet<Op>,
    calls: Vec<Op>,
}

#[derive(Default)]
pub struct MockStore {
    inner: Mutex<Inner>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `op` fail with `Unavailable` until cleared
    pub fn fail(&self, op: Op) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    /// Make every operation fail
    pub fn fail_all(&self) {
        let mut inner = self.inner.lock().unwrap();
        for op in [
            Op::CreateSession,
            Op::GetSession,
            Op::AppendMessage,
            Op::TouchSession,
            Op::IncrementTally,
            Op::GetHistory,
            Op::GetTallies,
        ] {
            inner.failing.insert(op);
        }
    }

    pub fn recover(&self) {
        self.inner.lock().unwrap().failing.clear();
    }

    /// Operations attempted, in order
    pub fn calls(&self) -> Vec<Op> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().unwrap().messages.clone()
    }

    pub fn tally(&self, session: i64, mood: MoodLabel) -> Option<i64> {
        self.inner
            .lock()
            .unwrap()
            .tallies
            .get(&(session, mood))
            .map(|t| t.count)
    }

    fn enter(&self, op: Op) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(op);
        if inner.failing.contains(&op) {
            return Err(StoreError::Unavailable(format!("simulated outage in {op:?}")));
        }
        Ok(inner)
    }
}

fn find_session(inner: &Inner, session_id: &str) -> StoreResult<Session> {
    inner
        .sessions
        .iter()
        .find(|s| s.session_id == session_id)
        .cloned()
        .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))
}

#[async_trait]
impl SessionStore for MockStore {
    async fn create_session(&self) -> StoreResult<Session> {
        let mut inner = self.enter(Op::CreateSession)?;
        let now = Utc::now();
        let session = Session {
            id: i64::try_from(inner.sessions.len()).unwrap() + 1,
            session_id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            last_active_at: now,
        };
        inner.sessions.push(session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> StoreResult<Session> {
        let inner = self.enter(Op::GetSession)?;
        find_session(&inner, session_id)
    }

    async fn append_message(
        &self,
        session_id: &str,
        message: NewMessage<'_>,
    ) -> StoreResult<Message> {
        let mut inner = self.enter(Op::AppendMessage)?;
        let session = find_session(&inner, session_id)?;
        let stored = Message {
            id: i64::try_from(inner.messages.len()).unwrap() + 1,
            session_id: session.id,
            direction: message.direction,
            text: message.text.to_string(),
            mood: message.mood,
            confidence: message.confidence,
            created_at: Utc::now(),
        };
        inner.messages.push(stored.clone());
        Ok(stored)
    }

    async fn touch_session(&self, session_id: &str) -> StoreResult<()> {
        let mut inner = self.enter(Op::TouchSession)?;
        let session = inner
            .sessions
            .iter_mut()
            .find(|s| s.session_id == session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        session.last_active_at = Utc::now();
        Ok(())
    }

    async fn increment_mood_tally(&self, session: i64, mood: MoodLabel) -> StoreResult<MoodTally> {
        let mut inner = self.enter(Op::IncrementTally)?;
        let tally = inner
            .tallies
            .entry((session, mood))
            .or_insert_with(|| MoodTally {
                session_id: session,
                mood,
                count: 0,
                updated_at: Utc::now(),
            });
        tally.count += 1;
        tally.updated_at = Utc::now();
        Ok(tally.clone())
    }

    async fn get_history(
        &self,
        session_id: &str,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Message>> {
        let inner = self.enter(Op::GetHistory)?;
        let session = find_session(&inner, session_id)?;
        Ok(inner
            .messages
            .iter()
            .filter(|m| m.session_id == session.id)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn get_mood_tallies(&self, session_id: &str) -> StoreResult<Vec<MoodTally>> {
        let inner = self.enter(Op::GetTallies)?;
        let session = find_session(&inner, session_id)?;
        let mut tallies: Vec<_> = inner
            .tallies
            .values()
            .filter(|t| t.session_id == session.id)
            .cloned()
            .collect();
        tallies.sort_by(|a, b| b.count.cmp(&a.count).then(a.mood.as_str().cmp(b.mood.as_str())));
        Ok(tallies)
    }
}
