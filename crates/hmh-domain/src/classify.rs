//! Keyword classifiers
//!
//! Fixed-threshold checks over plain text. The thresholds are empirical and
//! define the behavior; keep them as they are.

use crate::vocabulary::{
    ACTION_LIST_MIN_HITS, ACTION_VERB_STARTERS, RED_FLAG_MIN_HITS, STRONG_EMERGENCY_PHRASES,
    URGENT_QUERY_TERMS,
};

/// Count how many phrases occur in `text` (each phrase counted once)
pub fn count_phrase_hits(text: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| text.contains(*p)).count()
}

/// Whether a list reads as an emergency / red-flag list
///
/// True when at least two strong emergency phrases appear anywhere in the
/// concatenated, lower-cased items.
pub fn looks_like_red_flag_list<S: AsRef<str>>(items: &[S]) -> bool {
    let text = items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    count_phrase_hits(&text, STRONG_EMERGENCY_PHRASES) >= RED_FLAG_MIN_HITS
}

/// Whether a list reads as a list of actions
///
/// True when at least two items start with a word from the action-verb set.
/// The first word is whatever precedes the first space, punctuation included.
pub fn looks_like_action_list<S: AsRef<str>>(items: &[S]) -> bool {
    let hits = items
        .iter()
        .filter(|item| {
            let lower = item.as_ref().to_lowercase();
            let first = lower.split(' ').next().unwrap_or("");
            ACTION_VERB_STARTERS.contains(&first)
        })
        .count();
    hits >= ACTION_LIST_MIN_HITS
}

/// Whether normalized query text mentions an urgent symptom
pub fn is_urgent_query(normalized: &str) -> bool {
    count_phrase_hits(normalized, URGENT_QUERY_TERMS) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_flag_two_hits() {
        let items = ["Call 999 immediately", "Difficulty breathing or blue lips"];
        assert!(looks_like_red_flag_list(&items));
    }

    #[test]
    fn test_red_flag_single_hit_is_not_enough() {
        let items = ["Call 999 if it gets worse", "Rest at home", "Drink fluids"];
        assert!(!looks_like_red_flag_list(&items));
    }

    #[test]
    fn test_red_flag_no_hits() {
        let items = ["Rest", "Drink plenty of water"];
        assert!(!looks_like_red_flag_list(&items));
        let empty: [&str; 0] = [];
        assert!(!looks_like_red_flag_list(&empty));
    }

    #[test]
    fn test_red_flag_phrase_spanning_items() {
        // Items are joined with a space before matching.
        let items = ["lips or", "tongue swell", "stiff neck"];
        assert!(looks_like_red_flag_list(&items));
    }

    #[test]
    fn test_action_list() {
        let items = [
            "Try to get some sleep",
            "Drink plenty of fluids",
            "Paracetamol can help",
        ];
        assert!(looks_like_action_list(&items));
    }

    #[test]
    fn test_symptom_list_is_not_action_list() {
        let items = ["a high temperature", "a cough", "Try rest"];
        assert!(!looks_like_action_list(&items));
    }

    #[test]
    fn test_action_first_word_keeps_punctuation() {
        let items = ["Rest, then walk", "Drink, then eat", "Use ice"];
        // "rest," and "drink," are not starters; only "use" is.
        assert!(!looks_like_action_list(&items));
    }

    #[test]
    fn test_urgent_query() {
        assert!(is_urgent_query("i have chest pain and feel sick"));
        assert!(is_urgent_query("my dad may be having a stroke"));
        assert!(!is_urgent_query("i have a nosebleed"));
    }
}
