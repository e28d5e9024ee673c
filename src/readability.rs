//! Readability scoring
//!
//! Flesch-Kincaid grade level and word-count ratios computed purely from
//! word, sentence and syllable counts.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

const VOWELS: &str = "aeiouy";

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

/// Readability errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadabilityError {
    #[error("undefined score for empty input")]
    EmptyText,
}

/// Count syllables in a single word using the vowel-group heuristic.
///
/// Non-letters are stripped first; a word with no letters left has 0 syllables.
pub fn syllable_count(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if letters.is_empty() {
        return 0;
    }

    let mut syllables = 0;
    let mut prev_vowel = false;
    for ch in letters.chars() {
        let is_vowel = VOWELS.contains(ch);
        if is_vowel && !prev_vowel {
            syllables += 1;
        }
        prev_vowel = is_vowel;
    }

    // Silent trailing e
    if letters.ends_with('e') && syllables > 1 {
        syllables -= 1;
    }

    syllables.max(1)
}

/// Number of sentence-terminator runs, never less than 1
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_END_RE.find_iter(text).count().max(1)
}

/// Number of word-character runs
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Flesch-Kincaid grade level
pub fn fkgl(text: &str) -> Result<f64, ReadabilityError> {
    let words: Vec<&str> = WORD_RE.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return Err(ReadabilityError::EmptyText);
    }

    let word_total = words.len() as f64;
    let sentences = sentence_count(text) as f64;
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    Ok(0.39 * (word_total / sentences) + 11.8 * (syllables as f64 / word_total) - 15.59)
}

/// Words in `simplified` relative to words in `original`
pub fn length_ratio(original: &str, simplified: &str) -> f64 {
    word_count(simplified) as f64 / word_count(original).max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_count_examples() {
        // Silent trailing e: "sim-ple" loses its final group
        assert_eq!(syllable_count("simple"), 1);
        assert_eq!(syllable_count("the"), 1);
        assert_eq!(syllable_count("table"), 1);
        assert_eq!(syllable_count("water"), 2);
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("readability"), 5);
        assert_eq!(syllable_count("Rhythm"), 1);
    }

    #[test]
    fn test_syllable_count_strips_non_letters() {
        assert_eq!(syllable_count("Hello,"), 2);
        assert_eq!(syllable_count("1234"), 0);
        assert_eq!(syllable_count(""), 0);
        assert_eq!(syllable_count("--"), 0);
    }

    #[test]
    fn test_syllable_count_at_least_one_for_letters() {
        for word in ["b", "e", "shh", "bye", "queue", "strength", "a"] {
            assert!(syllable_count(word) >= 1, "{} should have a syllable", word);
        }
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count("Hello. How are you?"), 2);
        assert_eq!(sentence_count("Wait... what?!"), 2);
        assert_eq!(sentence_count("no terminator"), 1);
        assert_eq!(sentence_count(""), 1);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Hello, world!"), 2);
        assert_eq!(word_count("snake_case counts once"), 3);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_fkgl_known_value() {
        // 3 words, 1 sentence, 3 syllables
        let score = fkgl("The cat sat.").unwrap();
        let expected = 0.39 * 3.0 + 11.8 * 1.0 - 15.59;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fkgl_empty_input_is_error() {
        assert_eq!(fkgl(""), Err(ReadabilityError::EmptyText));
        assert_eq!(fkgl(" ... !"), Err(ReadabilityError::EmptyText));
    }

    #[test]
    fn test_fkgl_ignores_surrounding_whitespace() {
        let text = "Photosynthesis converts light into chemical energy. Plants need it.";
        let padded = format!("  \n\t{}\n  ", text);
        assert_eq!(fkgl(text).unwrap(), fkgl(&padded).unwrap());
    }

    #[test]
    fn test_length_ratio() {
        let text = "one two three four";
        assert_eq!(length_ratio(text, text), 1.0);
        assert_eq!(length_ratio(text, "one two"), 0.5);
        assert_eq!(length_ratio("", "one two"), 2.0);
        assert_eq!(length_ratio("", ""), 0.0);
    }
}
