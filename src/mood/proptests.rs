//! Property-based tests for classification and reply selection

use super::classifier::{crisis_phrases, keywords_for};
use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PRIORITY: [MoodLabel; 5] = [
    MoodLabel::Happy,
    MoodLabel::Sad,
    MoodLabel::Anxious,
    MoodLabel::Stressed,
    MoodLabel::Angry,
];

// ============================================================================
// Generators
// ============================================================================

/// Filler made of digits and punctuation so it can never form a keyword
fn arb_filler() -> impl Strategy<Value = String> {
    "[0-9 .,!?]{0,20}"
}

fn arb_crisis_phrase() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(crisis_phrases())
}

fn arb_mood() -> impl Strategy<Value = MoodLabel> {
    proptest::sample::select(PRIORITY.to_vec())
}

fn arb_keyword(mood: MoodLabel) -> impl Strategy<Value = &'static str> {
    proptest::sample::select(keywords_for(mood))
}

fn arb_casing(word: &str) -> impl Strategy<Value = String> {
    let word = word.to_string();
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

/// A mood keyword that does not also contain a keyword from an earlier set
fn clean_keyword(mood: MoodLabel, keyword: &str) -> bool {
    let lower = keyword.to_lowercase();
    !detect_crisis(&lower)
        && PRIORITY
            .iter()
            .filter(|m| **m != mood)
            .all(|m| keywords_for(*m).iter().all(|k| !lower.contains(k)))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn crisis_phrase_anywhere_forces_crisis(
        prefix in arb_filler(),
        phrase in arb_crisis_phrase().prop_flat_map(arb_casing),
        suffix in arb_filler(),
        mood in arb_mood(),
    ) {
        let mood_word = keywords_for(mood)[0];
        let text = format!("{prefix}{mood_word} {phrase}{suffix}");
        let c = classify(&text);
        prop_assert_eq!(c.mood, MoodLabel::Crisis);
        prop_assert!(c.is_crisis);
    }

    #[test]
    fn single_mood_keyword_selects_that_mood(
        (mood, keyword) in arb_mood().prop_flat_map(|m| (Just(m), arb_keyword(m))),
        prefix in arb_filler(),
        suffix in arb_filler(),
    ) {
        prop_assume!(clean_keyword(mood, keyword));
        let c = classify(&format!("{prefix}{keyword}{suffix}"));
        prop_assert_eq!(c.mood, mood);
        prop_assert!(!c.is_crisis);
    }

    #[test]
    fn earlier_mood_set_wins(
        a in 0usize..5,
        b in 0usize..5,
        ka in 0usize..6,
        kb in 0usize..6,
    ) {
        prop_assume!(a != b);
        let (first, second) = (PRIORITY[a], PRIORITY[b]);
        let wa = keywords_for(first)[ka % keywords_for(first).len()];
        let wb = keywords_for(second)[kb % keywords_for(second).len()];
        let text = format!("{wa} and {wb}");
        let lower = text.to_lowercase();
        let expected = PRIORITY
            .iter()
            .copied()
            .find(|m| keywords_for(*m).iter().any(|k| lower.contains(k)))
            .unwrap_or(MoodLabel::Neutral);
        let c = classify(&text);
        prop_assert_eq!(c.mood, expected);
        prop_assert!(!c.is_crisis);
    }

    #[test]
    fn text_without_letters_is_neutral(text in "[0-9 .,!?\\t\\n]{0,40}") {
        let c = classify(&text);
        prop_assert_eq!(c.mood, MoodLabel::Neutral);
        prop_assert!(!c.is_crisis);
    }

    #[test]
    fn crisis_reply_constant_for_any_mood(seed in any::<u64>(), idx in 0usize..7) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(generate(MoodLabel::ALL[idx], true, &mut rng), CRISIS_RESPONSE);
    }

    #[test]
    fn reply_always_from_mood_templates(seed in any::<u64>(), idx in 0usize..7) {
        let mood = MoodLabel::ALL[idx];
        let mut rng = StdRng::seed_from_u64(seed);
        let reply = generate(mood, false, &mut rng);
        prop_assert!(templates_for(mood).contains(&reply));
    }
}
