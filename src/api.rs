//! HTTP API for the empathy chat backend

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::chat::ChatService;
use crate::store::SessionStore;
use std::sync::Arc;

/// Chat service behind the HTTP surface; the store is erased so tests can swap it
pub type SharedChatService = Arc<ChatService<Arc<dyn SessionStore>>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: SharedChatService,
}

impl AppState {
    pub fn new(chat: ChatService<Arc<dyn SessionStore>>) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}
