//! Chat widget state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The widget driver in [`crate::widget`] executes the effects.

mod effect;
pub mod event;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatState, TranscriptEntry};
pub use transition::{transition, TransitionError, TransitionResult, WELCOME_MESSAGE};
