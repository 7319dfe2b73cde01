//! Scripted reply templates

use super::MoodLabel;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed reply for any message that trips the crisis check
pub const CRISIS_RESPONSE: &str = "I'm really concerned about what you've shared. Your life matters, and help is available right now. Please reach out to a crisis helpline immediately:\n\n\u{1f198} EMERGENCY RESOURCES:\n\u{2022} National Suicide Prevention Lifeline: 988 (US)\n\u{2022} Crisis Text Line: Text HOME to 741741\n\u{2022} International Association for Suicide Prevention: https://www.iasp.info/resources/Crisis_Centres/\n\nPlease talk to someone who can provide immediate professional help. You don't have to go through this alone.";

const HAPPY: &[&str] = &[
    "That's wonderful to hear! It's great that you're feeling positive. What's been making you feel this way?",
    "I'm so glad you're feeling happy! Positive emotions are precious. Would you like to share what's going well?",
];

const SAD: &[&str] = &[
    "I'm sorry you're feeling this way. It's okay to feel sad, and your feelings are valid. Would you like to talk about what's on your mind?",
    "I hear you, and I'm here for you. Sadness is a natural emotion. Remember, it's okay to not be okay sometimes.",
];

const ANXIOUS: &[&str] = &[
    "Anxiety can be really challenging. Let's take a moment together. Try taking a deep breath in for 4 counts, hold for 4, and exhale for 4. Would you like to talk about what's causing your anxiety?\n\n\u{1f4a1} Coping Strategy: Try the 5-4-3-2-1 grounding technique - Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, and 1 you taste.",
    "I understand that you're feeling anxious. Remember, you're not alone in this. Have you tried any grounding techniques like focusing on your five senses?\n\n\u{1f4a1} Coping Strategy: Practice box breathing - Breathe in for 4 counts, hold for 4, breathe out for 4, hold for 4. Repeat 4 times.",
];

const STRESSED: &[&str] = &[
    "Stress can be really tough to handle. Remember to be kind to yourself. Have you been able to take any breaks today?\n\n\u{1f4a1} Coping Strategy: Take a 5-minute break. Step away from what's stressing you, stretch, or take a short walk.",
    "I hear that you're feeling stressed. It's important to acknowledge when things feel like too much. What's been weighing on you?\n\n\u{1f4a1} Coping Strategy: Make a to-do list and prioritize. Break large tasks into smaller, manageable steps.",
];

const ANGRY: &[&str] = &[
    "I can sense you're feeling frustrated or angry. Those feelings are valid. Would you like to talk about what's upsetting you?\n\n\u{1f4a1} Coping Strategy: Take a timeout. Step away from the situation and give yourself space to cool down.",
    "Anger is a natural emotion. It's okay to feel this way. Taking a few deep breaths might help. What's triggering these feelings?",
];

const NEUTRAL: &[&str] = &[
    "I'm here to listen. How are you feeling today?",
    "Thank you for sharing with me. What's on your mind?",
    "I'm here to support you. How can I help you today?",
];

/// Templates registered for a mood.
///
/// `Crisis` has no random templates of its own (the crisis reply is fixed),
/// so it falls back to the neutral set like any unregistered mood.
pub fn templates_for(mood: MoodLabel) -> &'static [&'static str] {
    match mood {
        MoodLabel::Happy => HAPPY,
        MoodLabel::Sad => SAD,
        MoodLabel::Anxious => ANXIOUS,
        MoodLabel::Stressed => STRESSED,
        MoodLabel::Angry => ANGRY,
        MoodLabel::Crisis | MoodLabel::Neutral => NEUTRAL,
    }
}

/// Pick the reply for a classified message.
///
/// Crisis always yields [`CRISIS_RESPONSE`]; otherwise a template is drawn
/// uniformly from the mood's set using the caller's RNG.
pub fn generate<R: Rng + ?Sized>(mood: MoodLabel, is_crisis: bool, rng: &mut R) -> &'static str {
    if is_crisis {
        return CRISIS_RESPONSE;
    }

    templates_for(mood)
        .choose(rng)
        .copied()
        .unwrap_or(NEUTRAL[0])
}
