//! Word counting, normalization and readability statistics over raw text.

use std::sync::OnceLock;

use hyphenation::{Hyphenator, Language, Load, Standard};
use regex::Regex;

use super::types::ReadabilityResult;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w+\b").unwrap())
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s']").unwrap())
}

fn sentence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[^.!?]+[.!?]*").unwrap())
}

// Flesch constants
const FRE_BASE: f64 = 206.835;
const FRE_SENTENCE_WEIGHT: f64 = 1.015;
const FRE_SYLLABLE_WEIGHT: f64 = 84.6;
const FKG_SENTENCE_WEIGHT: f64 = 0.39;
const FKG_SYLLABLE_WEIGHT: f64 = 11.8;
const FKG_OFFSET: f64 = 15.59;

/// Sentences with this many words or fewer are not counted.
const MIN_SENTENCE_WORDS: usize = 2;

pub struct TextMetrics;

impl TextMetrics {
    /// Lower-cases, collapses whitespace runs to one space and trims.
    pub fn normalize(text: &str) -> String {
        let lowered = text.to_lowercase();
        whitespace_re().replace_all(&lowered, " ").trim().to_string()
    }

    /// Number of maximal word-character runs in the lower-cased text.
    pub fn word_count(text: &str) -> usize {
        word_re().find_iter(&text.to_lowercase()).count()
    }

    /// Flesch reading ease and Flesch-Kincaid grade, rounded to two decimals.
    ///
    /// Empty text yields the formula constants rather than an error: with no
    /// words both averages are zero.
    pub fn readability_stats(text: &str) -> ReadabilityResult {
        let words = Self::lexicon_count(text);
        let sentences = Self::sentence_count(text);
        let syllables = Self::syllable_count(text);

        let (words_per_sentence, syllables_per_word) = if words == 0 {
            (0.0, 0.0)
        } else {
            (
                words as f64 / sentences as f64,
                syllables as f64 / words as f64,
            )
        };

        let reading_ease = FRE_BASE
            - FRE_SENTENCE_WEIGHT * words_per_sentence
            - FRE_SYLLABLE_WEIGHT * syllables_per_word;
        let grade_level = FKG_SENTENCE_WEIGHT * words_per_sentence
            + FKG_SYLLABLE_WEIGHT * syllables_per_word
            - FKG_OFFSET;

        ReadabilityResult::new(reading_ease, grade_level)
    }

    fn strip_punctuation(text: &str) -> String {
        punctuation_re().replace_all(text, "").into_owned()
    }

    /// Whitespace-separated words once punctuation (apostrophes excepted) is gone.
    pub fn lexicon_count(text: &str) -> usize {
        Self::strip_punctuation(text).split_whitespace().count()
    }

    /// Sentence spans, ignoring fragments of two words or fewer. At least 1.
    pub fn sentence_count(text: &str) -> usize {
        let spans: Vec<&str> = sentence_re().find_iter(text).map(|m| m.as_str()).collect();
        let ignored = spans
            .iter()
            .filter(|span| Self::lexicon_count(span) <= MIN_SENTENCE_WORDS)
            .count();
        (spans.len() - ignored).max(1)
    }

    /// Hyphenation points plus one for every word, with a floor of one.
    pub fn syllable_count(text: &str) -> usize {
        let dict = dictionary();
        Self::strip_punctuation(&text.to_lowercase())
            .split_whitespace()
            .map(|word| syllables_in_word(dict, word))
            .sum()
    }
}

/// US English Knuth-Liang patterns, loaded once. Breaks are allowed two
/// characters from either end of a word.
fn dictionary() -> Option<&'static Standard> {
    static DICT: OnceLock<Option<Standard>> = OnceLock::new();
    DICT.get_or_init(|| match Standard::from_embedded(Language::EnglishUS) {
        Ok(mut dict) => {
            dict.minima = (2, 2);
            Some(dict)
        }
        Err(e) => {
            tracing::warn!(error = %e, "hyphenation dictionary unavailable, counting one syllable per word");
            None
        }
    })
    .as_ref()
}

fn syllables_in_word(dict: Option<&Standard>, word: &str) -> usize {
    match dict {
        Some(dict) => dict.hyphenate(word).breaks.len() + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses_whitespace() {
        assert_eq!(TextMetrics::normalize("  Hello\n\tWORLD   again "), "hello world again");
        assert_eq!(TextMetrics::normalize(""), "");
        assert_eq!(TextMetrics::normalize(" \n "), "");
    }

    #[test]
    fn word_count_uses_word_character_runs() {
        assert_eq!(TextMetrics::word_count("Contact us today for a free consultation."), 7);
        assert_eq!(TextMetrics::word_count("e-mail us_now, 2024!"), 4);
        assert_eq!(TextMetrics::word_count(""), 0);
    }

    #[test]
    fn sentence_count_ignores_short_fragments() {
        assert_eq!(TextMetrics::sentence_count("Hi. This is a real sentence. So is this one!"), 2);
        assert_eq!(TextMetrics::sentence_count(""), 1);
    }

    #[test]
    fn lexicon_count_keeps_apostrophes() {
        assert_eq!(TextMetrics::lexicon_count("Don't stop -- believing!"), 3);
    }

    #[test]
    fn syllables_follow_hyphenation_points() {
        assert_eq!(TextMetrics::syllable_count("services"), 2);
        assert_eq!(TextMetrics::syllable_count("create"), 2);
        assert_eq!(TextMetrics::syllable_count("every"), 2);
        assert_eq!(TextMetrics::syllable_count("business"), 2);
        assert_eq!(TextMetrics::syllable_count("cat"), 1);
        assert_eq!(TextMetrics::syllable_count("Services, every business!"), 6);
        assert_eq!(TextMetrics::syllable_count(""), 0);
    }

    #[test]
    fn reading_ease_matches_reference_values() {
        let plain = TextMetrics::readability_stats("The big dog ran to the red barn and sat down.");
        assert_eq!(plain.flesch_reading_ease, 111.07);
        assert_eq!(plain.flesch_kincaid_grade, 0.5);

        // 8 words, 11 syllables, one sentence
        let mixed = TextMetrics::readability_stats("Our services help every business create plans.");
        assert_eq!(mixed.flesch_reading_ease, 82.39);
        assert!(mixed.easy_to_read);
    }

    #[test]
    fn empty_text_has_defined_readability() {
        let result = TextMetrics::readability_stats("");
        assert!(result.flesch_reading_ease.is_finite());
        assert!(result.flesch_kincaid_grade.is_finite());
        assert!(result.flesch_reading_ease > 200.0);
        assert_eq!(result.flesch_kincaid_grade, 0.0);
    }

    #[test]
    fn simple_text_reads_easier_than_dense_text() {
        let simple = TextMetrics::readability_stats("The cat sat on the mat. The dog ran to the park.");
        let dense = TextMetrics::readability_stats(
            "Organizational transformation necessitates comprehensive infrastructural modernization \
             initiatives encompassing sophisticated analytical methodologies and interoperability considerations.",
        );
        assert!(simple.flesch_reading_ease > dense.flesch_reading_ease);
        assert!(simple.flesch_kincaid_grade < dense.flesch_kincaid_grade);
        assert!(simple.easy_to_read);
        assert!(!dense.easy_to_read);
    }

    #[test]
    fn readability_is_deterministic() {
        let text = "We help you build dashboards. Contact us to get started today.";
        assert_eq!(TextMetrics::readability_stats(text), TextMetrics::readability_stats(text));
    }
}
