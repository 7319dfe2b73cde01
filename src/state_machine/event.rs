//! Events that can occur in a chat widget

use crate::chat::{ChatError, ChatReply};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    PageLoaded,
    DisclaimerAccepted,
    MessageSubmitted { text: String },

    // Session events
    SessionCreated { session_id: String },
    SessionFailed { error: ChatError },

    // Reply events
    ReplyReceived { reply: ChatReply },
    ReplyFailed { error: ChatError },
}
