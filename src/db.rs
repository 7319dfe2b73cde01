//! Database module for empathy-chat
//!
//! Provides persistence for sessions, messages and per-session mood tallies.

mod schema;

pub use schema::*;

use crate::mood::MoodLabel;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    // ==================== Session Operations ====================

    /// Create a new session with the given public identifier
    pub fn create_session(&self, session_id: &str) -> DbResult<Session> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO sessions (session_id, created_at, last_active_at) VALUES (?1, ?2, ?2)",
            params![session_id, format_datetime(&now)],
        )?;

        Ok(Session {
            id: conn.last_insert_rowid(),
            session_id: session_id.to_string(),
            created_at: now,
            last_active_at: now,
        })
    }

    /// Get session by its public identifier
    pub fn get_session(&self, session_id: &str) -> DbResult<Session> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, session_id, created_at, last_active_at FROM sessions WHERE session_id = ?1",
            params![session_id],
            |row| {
                Ok(Session {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?),
                    last_active_at: parse_datetime(&row.get::<_, String>(3)?),
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::SessionNotFound(session_id.to_string()),
            other => DbError::Sqlite(other),
        })
    }

    /// Bump the session's last-active timestamp
    pub fn touch_session(&self, session_id: &str) -> DbResult<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE sessions SET last_active_at = ?1 WHERE session_id = ?2",
            params![format_datetime(&Utc::now()), session_id],
        )?;

        if updated == 0 {
            return Err(DbError::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    // ==================== Message Operations ====================

    /// Add a message to a session (by internal row id)
    pub fn add_message(&self, session: i64, message: &NewMessage<'_>) -> DbResult<Message> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO messages (session_id, direction, text, mood, confidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session,
                message.direction.to_string(),
                message.text,
                message.mood.map(MoodLabel::as_str),
                message.confidence,
                format_datetime(&now),
            ],
        )?;

        Ok(Message {
            id: conn.last_insert_rowid(),
            session_id: session,
            direction: message.direction,
            text: message.text.to_string(),
            mood: message.mood,
            confidence: message.confidence,
            created_at: now,
        })
    }

    /// Get messages for a session, oldest first.
    ///
    /// `limit` keeps only the oldest `limit` messages.
    pub fn get_messages(&self, session: i64, limit: Option<usize>) -> DbResult<Vec<Message>> {
        let conn = self.conn()?;
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
        let mut stmt = conn.prepare(
            "SELECT id, session_id, direction, text, mood, confidence, created_at
             FROM messages WHERE session_id = ?1
             ORDER BY created_at ASC, id ASC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![session, limit], parse_message_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    // ==================== Mood Tally Operations ====================

    /// Increment the tally for (session, mood), creating it at 1 if absent.
    ///
    /// Single upsert statement, so overlapping increments never lose counts.
    pub fn increment_mood_tally(&self, session: i64, mood: MoodLabel) -> DbResult<MoodTally> {
        let conn = self.conn()?;
        let now = format_datetime(&Utc::now());

        let (count, updated_at): (i64, String) = conn.query_row(
            "INSERT INTO mood_tallies (session_id, mood, count, updated_at) VALUES (?1, ?2, 1, ?3)
             ON CONFLICT (session_id, mood)
             DO UPDATE SET count = count + 1, updated_at = excluded.updated_at
             RETURNING count, updated_at",
            params![session, mood.as_str(), now],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(MoodTally {
            session_id: session,
            mood,
            count,
            updated_at: parse_datetime(&updated_at),
        })
    }

    /// Get all tallies for a session, most frequent first
    pub fn get_mood_tallies(&self, session: i64) -> DbResult<Vec<MoodTally>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT session_id, mood, count, updated_at FROM mood_tallies
             WHERE session_id = ?1 ORDER BY count DESC, mood ASC",
        )?;

        let rows = stmt.query_map(params![session], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut tallies = Vec::new();
        for row in rows {
            let (session_id, label, count, updated_at) = row?;
            // Rows written by this module always hold a known label
            let Ok(mood) = label.parse::<MoodLabel>() else {
                tracing::warn!(session_id, mood = %label, "Skipping tally with unknown mood");
                continue;
            };
            tallies.push(MoodTally {
                session_id,
                mood,
                count,
                updated_at: parse_datetime(&updated_at),
            });
        }
        Ok(tallies)
    }
}

/// Parse a message row from the database
fn parse_message_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        session_id: row.get(1)?,
        direction: parse_direction(&row.get::<_, String>(2)?),
        text: row.get(3)?,
        mood: row
            .get::<_, Option<String>>(4)?
            .and_then(|label| parse_mood(&label)),
        confidence: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

fn parse_direction(s: &str) -> Direction {
    match s {
        "bot" => Direction::Bot,
        "user" => Direction::User,
        other => {
            tracing::warn!(direction = %other, "Unknown message direction, reading as user");
            Direction::User
        }
    }
}

fn parse_mood(label: &str) -> Option<MoodLabel> {
    match label.parse() {
        Ok(mood) => Some(mood),
        Err(_) => {
            tracing::warn!(mood = %label, "Unknown message mood, dropping it");
            None
        }
    }
}

/// Fixed-width timestamps keep lexical order equal to chronological order
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
