//! Chat widget driver
//!
//! Owns the state of one browser tab (phase, transcript, crisis banner) and
//! runs the effects the pure transition function asks for.

use crate::chat::ChatService;
use crate::state_machine::{transition, ChatState, Effect, Event, TranscriptEntry, TransitionError};
use crate::store::SessionStore;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct ChatWidget<S: SessionStore> {
    service: Arc<ChatService<S>>,
    state: ChatState,
    transcript: Vec<TranscriptEntry>,
    crisis_banner: bool,
}

impl<S: SessionStore> ChatWidget<S> {
    pub fn new(service: Arc<ChatService<S>>) -> Self {
        Self {
            service,
            state: ChatState::default(),
            transcript: Vec::new(),
            crisis_banner: false,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn crisis_banner(&self) -> bool {
        self.crisis_banner
    }

    /// Show the disclaimer gate
    pub async fn load(&mut self) -> Result<(), TransitionError> {
        self.handle(Event::PageLoaded).await
    }

    /// Accept the disclaimer and create the session
    pub async fn accept_disclaimer(&mut self) -> Result<(), TransitionError> {
        self.handle(Event::DisclaimerAccepted).await
    }

    /// Submit a message and wait for its reply
    pub async fn submit(&mut self, text: &str) -> Result<(), TransitionError> {
        self.handle(Event::MessageSubmitted {
            text: text.to_string(),
        })
        .await
    }

    /// Apply an event, then keep running effects until none are left.
    ///
    /// Only the initial event can be rejected; follow-up events come from
    /// effects this state just asked for.
    async fn handle(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;
        let mut pending: VecDeque<Effect> = result.effects.into();

        while let Some(effect) = pending.pop_front() {
            if let Some(next) = self.execute(effect).await {
                match transition(&self.state, next) {
                    Ok(result) => {
                        self.state = result.new_state;
                        pending.extend(result.effects);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected follow-up event");
                    }
                }
            }
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::CreateSession => Some(match self.service.start_session().await {
                Ok(session_id) => Event::SessionCreated { session_id },
                Err(error) => Event::SessionFailed { error },
            }),
            Effect::SendMessage { session_id, text } => {
                Some(match self.service.send_message(&session_id, &text).await {
                    Ok(reply) => Event::ReplyReceived { reply },
                    Err(error) => {
                        tracing::warn!(session_id = %session_id, error = %error, "Chat turn failed");
                        Event::ReplyFailed { error }
                    }
                })
            }
            Effect::AppendEntry(entry) => {
                self.transcript.push(entry);
                None
            }
            Effect::RaiseCrisisBanner => {
                self.crisis_banner = true;
                None
            }
        }
    }
}
