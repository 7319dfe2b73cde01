//! API request and response types

use crate::db::{Message, MoodTally};
use crate::mood::MoodLabel;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
///
/// Both fields are optional at the wire level so a missing one can be
/// reported with our own error body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub success: bool,
    pub session_id: String,
    pub message: &'static str,
}

/// Response for a chat turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub mood: MoodLabel,
    pub confidence: f64,
    pub is_crisis: bool,
}

/// Response with session history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<Message>,
}

/// Response with mood tallies
#[derive(Debug, Serialize)]
pub struct MoodAnalyticsResponse {
    pub success: bool,
    pub moods: Vec<MoodTally>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}
