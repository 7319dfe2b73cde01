//! Database schema and types

use crate::mood::MoodLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    last_active_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL,
    direction TEXT NOT NULL CHECK (direction IN ('user', 'bot')),
    text TEXT NOT NULL,
    mood TEXT,
    confidence REAL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_messages_session ON messages(session_id, created_at, id);

CREATE TABLE IF NOT EXISTS mood_tallies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL,
    mood TEXT NOT NULL,
    count INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL,

    UNIQUE (session_id, mood),
    FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE
);
";

/// Session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Internal row id, used as the foreign key for messages and tallies
    #[serde(skip)]
    pub id: i64,
    /// Opaque public identifier handed to the client
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    User,
    Bot,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::User => write!(f, "user"),
            Direction::Bot => write!(f, "bot"),
        }
    }
}

/// Message record
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: i64,
    #[serde(skip)]
    pub session_id: i64,
    pub direction: Direction,
    pub text: String,
    pub mood: Option<MoodLabel>,
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Running count of how often a mood was detected in a session
#[derive(Debug, Clone, Serialize)]
pub struct MoodTally {
    #[serde(skip)]
    pub session_id: i64,
    pub mood: MoodLabel,
    pub count: i64,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a message about to be written
#[derive(Debug, Clone, Copy)]
pub struct NewMessage<'a> {
    pub direction: Direction,
    pub text: &'a str,
    pub mood: Option<MoodLabel>,
    pub confidence: Option<f64>,
}

impl<'a> NewMessage<'a> {
    pub fn user(text: &'a str, mood: MoodLabel, confidence: f64) -> Self {
        Self {
            direction: Direction::User,
            text,
            mood: Some(mood),
            confidence: Some(confidence),
        }
    }

    /// Bot replies are always tagged neutral with zero confidence,
    /// whatever mood triggered them.
    pub fn bot(text: &'a str) -> Self {
        Self {
            direction: Direction::Bot,
            text,
            mood: Some(MoodLabel::Neutral),
            confidence: Some(0.0),
        }
    }
}
