//! Property-based tests for the widget state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::chat::{ChatError, ChatReply};
use crate::db::Direction;
use crate::mood::MoodLabel;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mood() -> impl Strategy<Value = MoodLabel> {
    proptest::sample::select(MoodLabel::ALL.to_vec())
}

fn arb_reply() -> impl Strategy<Value = ChatReply> {
    ("[a-z ]{1,20}", arb_mood(), any::<bool>()).prop_map(|(response, mood, is_crisis)| ChatReply {
        response,
        mood,
        confidence: 0.7,
        is_crisis,
    })
}

fn arb_error() -> impl Strategy<Value = ChatError> {
    prop_oneof![
        "[a-z]{4}".prop_map(ChatError::SessionNotFound),
        "[a-z]{4}".prop_map(ChatError::StoreUnavailable),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::PageLoaded),
        Just(Event::DisclaimerAccepted),
        "[ a-z]{0,12}".prop_map(|text| Event::MessageSubmitted { text }),
        "[a-f0-9]{8}".prop_map(|session_id| Event::SessionCreated { session_id }),
        arb_error().prop_map(|error| Event::SessionFailed { error }),
        arb_reply().prop_map(|reply| Event::ReplyReceived { reply }),
        arb_error().prop_map(|error| Event::ReplyFailed { error }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Once a session is active it never changes identity or phase
    #[test]
    fn session_active_is_terminal(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::default();
        let mut established: Option<String> = None;

        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
            if let Some(id) = &established {
                prop_assert_eq!(state.session_id(), Some(id.as_str()));
            } else if let Some(id) = state.session_id() {
                established = Some(id.to_string());
            }
        }
    }

    /// At most one request chain is ever outstanding
    #[test]
    fn never_two_requests_in_flight(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::default();
        let mut in_flight = false;

        for event in events {
            let Ok(result) = transition(&state, event) else { continue };
            let starts = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::CreateSession | Effect::SendMessage { .. }))
                .count();
            prop_assert!(starts <= 1);
            if starts == 1 {
                prop_assert!(!in_flight, "request started while another was pending");
            }
            state = result.new_state;
            in_flight = state.is_loading();
        }
    }

    /// While loading, only the matching completion event is accepted
    #[test]
    fn loading_accepts_only_completions(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::default();
        for event in events {
            let was_loading = state.is_loading();
            let completion = matches!(
                event,
                Event::SessionCreated { .. }
                    | Event::SessionFailed { .. }
                    | Event::ReplyReceived { .. }
                    | Event::ReplyFailed { .. }
            );
            let Ok(result) = transition(&state, event) else { continue };
            if was_loading {
                prop_assert!(completion);
                prop_assert!(!result.new_state.is_loading());
            }
            state = result.new_state;
        }
    }

    /// Only a crisis reply raises the banner, and every crisis reply does
    #[test]
    fn banner_tracks_crisis_replies(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::default();
        for event in events {
            let crisis = matches!(&event, Event::ReplyReceived { reply } if reply.is_crisis);
            let Ok(result) = transition(&state, event) else { continue };
            let raised = result.effects.contains(&Effect::RaiseCrisisBanner);
            prop_assert_eq!(raised, crisis);
            state = result.new_state;
        }
    }

    /// Accepted submissions echo the trimmed text exactly once
    #[test]
    fn submission_echoes_trimmed_text(text in "[ ]{0,3}[a-z]{1,10}[ ]{0,3}") {
        let state = ChatState::SessionActive {
            session_id: "s".to_string(),
            awaiting_reply: false,
        };
        let result = transition(&state, Event::MessageSubmitted { text: text.clone() }).unwrap();
        let user_entries: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::AppendEntry(entry) if entry.sender == Direction::User => Some(entry.text.clone()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(user_entries, vec![text.trim().to_string()]);
    }
}
