//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, CreateSessionResponse, ErrorResponse, HealthResponse,
    HistoryResponse, MoodAnalyticsResponse,
};
use super::AppState;
use crate::chat::ChatError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Session creation
        .route("/api/session/create", post(create_session))
        // Chat turn
        .route("/api/chat", post(send_chat))
        // Read-only session views
        .route("/api/history/:session_id", get(get_history))
        .route("/api/mood-analytics/:session_id", get(get_mood_analytics))
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Empathy chat API is running",
    })
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let session_id = state
        .chat
        .start_session()
        .await
        .map_err(|_| AppError::Internal("Failed to create session".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            success: true,
            session_id,
            message: "Session created successfully",
        }),
    ))
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let missing =
        || AppError::BadRequest("Missing required fields: message and session_id".to_string());

    let Json(req) = payload.map_err(|_| missing())?;
    let (Some(session_id), Some(message)) = (req.session_id, req.message) else {
        return Err(missing());
    };

    let text = message.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let reply = state
        .chat
        .send_message(&session_id, text)
        .await
        .map_err(AppError::from)?;

    Ok(Json(ChatResponse {
        success: true,
        response: reply.response,
        mood: reply.mood,
        confidence: reply.confidence,
        is_crisis: reply.is_crisis,
    }))
}

// ============================================================
// Session Views
// ============================================================

async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = state
        .chat
        .history(&session_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(HistoryResponse {
        success: true,
        history,
    }))
}

async fn get_mood_analytics(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MoodAnalyticsResponse>, AppError> {
    let moods = state
        .chat
        .mood_summary(&session_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(MoodAnalyticsResponse {
        success: true,
        moods,
    }))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::SessionNotFound(_) => AppError::NotFound("Invalid session".to_string()),
            ChatError::StoreUnavailable(_) => {
                AppError::Internal("An error occurred processing your message".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
