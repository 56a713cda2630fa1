//! Property-based tests for word segmentation across casings
//! **Property: camel and snake agree on the word sequence of an identifier**

use proptest::prelude::*;
use stencil_generation::{split_words, to_camel_case, to_snake_case};

/// Strategy for a lower-case ASCII word that starts with a letter
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

/// Whether camel output of `words` has a single hump reading.
///
/// A one-letter word after the first is upper-cased in camel output. When
/// the next word does not continue with a lower-case letter, the two
/// capitals form a run ("x a b" becomes "xAB") that no hump rule can tell
/// apart from a two-letter word.
fn camel_words_are_recoverable(words: &[String]) -> bool {
    words
        .iter()
        .skip(1)
        .zip(words.iter().skip(2))
        .all(|(word, next)| {
            word.len() > 1 || next.chars().nth(1).is_some_and(|ch| ch.is_ascii_lowercase())
        })
}

/// Strategy for identifiers built from words and a mix of separators
fn identifier_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    (
        prop::collection::vec(word_strategy(), 1..5)
            .prop_filter("one-letter word followed by an upper-case run", |words| {
                camel_words_are_recoverable(words)
            }),
        prop::collection::vec(prop::sample::select(vec!["_", "-", " ", "__", " - "]), 4),
    )
        .prop_map(|(words, separators)| {
            let mut identifier = String::new();
            for (index, word) in words.iter().enumerate() {
                if index > 0 {
                    identifier.push_str(separators[(index - 1) % separators.len()]);
                }
                identifier.push_str(word);
            }
            (words, identifier)
        })
}

fn lowered(words: Vec<&str>) -> Vec<String> {
    words.into_iter().map(str::to_lowercase).collect()
}

proptest! {
    /// Property: re-splitting camel output on humps yields the snake words
    #[test]
    fn prop_camel_and_snake_agree_on_words((_, identifier) in identifier_strategy()) {
        let camel = to_camel_case(&identifier);
        let camel_words = lowered(split_words(&camel));

        let snake = to_snake_case(&identifier.replace("__", "_"));
        let snake_words: Vec<String> = snake.split('_').map(str::to_string).collect();

        prop_assert_eq!(camel_words, snake_words);
    }

    /// Property: camel recovers the original words
    #[test]
    fn prop_camel_recovers_original_words((words, identifier) in identifier_strategy()) {
        let camel = to_camel_case(&identifier);
        prop_assert_eq!(lowered(split_words(&camel)), words);
    }

    /// Property: pascal-cased input snakes back to the original words
    #[test]
    fn prop_snake_splits_pascal_humps(
        words in prop::collection::vec(word_strategy(), 1..5).prop_filter(
            "snake keeps upper-case runs together",
            |words| words.iter().rev().skip(1).all(|word| word.len() > 1),
        )
    ) {
        let pascal: String = words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect();

        prop_assert_eq!(to_snake_case(&pascal), words.join("_"));
    }
}

#[test]
fn test_one_letter_words_survive_camel_round_trip() {
    for (identifier, words) in [
        ("mail a record", vec!["mail", "a", "record"]),
        ("a-record", vec!["a", "record"]),
        ("mail_a", vec!["mail", "a"]),
    ] {
        let camel = to_camel_case(identifier);
        assert_eq!(lowered(split_words(&camel)), words, "identifier {:?}", identifier);
    }
}
