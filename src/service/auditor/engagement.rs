//! Call-to-action detection and a conversational-tone heuristic.

use std::sync::OnceLock;

use regex::Regex;

use super::text_metrics::TextMetrics;
use super::types::EngagementResult;

/// Trigger phrases, in reporting order.
pub const CTA_PHRASES: [&str; 10] = [
    "contact us",
    "book a demo",
    "book demo",
    "get started",
    "talk to an expert",
    "schedule a call",
    "request a demo",
    "free consultation",
    "download",
    "reach out",
];

/// Pronouns that signal a reader-facing tone.
pub const CONVERSATIONAL_WORDS: [&str; 4] = ["you", "your", "we", "us"];

fn conversational_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CONVERSATIONAL_WORDS
            .iter()
            .map(|w| Regex::new(&format!(r"\b{}\b", w)).unwrap())
            .collect()
    })
}

pub struct EngagementSignalDetector;

impl EngagementSignalDetector {
    /// CTA phrases are plain substring matches against either the content or
    /// the CTA field; the pronoun count is word-bounded and content only.
    pub fn evaluate(content: &str, cta: &str) -> EngagementResult {
        let content_clean = TextMetrics::normalize(content);
        let cta_clean = TextMetrics::normalize(cta);

        let cta_phrases_found: Vec<String> = CTA_PHRASES
            .iter()
            .filter(|phrase| content_clean.contains(**phrase) || cta_clean.contains(**phrase))
            .map(|phrase| phrase.to_string())
            .collect();

        let conversational_score = conversational_patterns()
            .iter()
            .map(|re| re.find_iter(&content_clean).count())
            .sum();

        EngagementResult {
            cta_present: !cta_phrases_found.is_empty(),
            cta_phrases_found,
            conversational_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_are_reported_in_list_order() {
        let result = EngagementSignalDetector::evaluate(
            "Reach out for a FREE consultation, or just contact us.",
            "",
        );
        assert!(result.cta_present);
        assert_eq!(
            result.cta_phrases_found,
            vec!["contact us", "free consultation", "reach out"]
        );
    }

    #[test]
    fn cta_field_counts_for_phrases() {
        let result = EngagementSignalDetector::evaluate("No call to action here.", "Book a Demo");
        assert_eq!(result.cta_phrases_found, vec!["book a demo"]);
    }

    #[test]
    fn phrases_match_as_substrings() {
        let result = EngagementSignalDetector::evaluate("Grab the downloads page.", "");
        assert_eq!(result.cta_phrases_found, vec!["download"]);
    }

    #[test]
    fn phrases_span_collapsed_whitespace() {
        let result = EngagementSignalDetector::evaluate("get\n\n   started now", "");
        assert_eq!(result.cta_phrases_found, vec!["get started"]);
    }

    #[test]
    fn conversational_score_counts_whole_words_in_content_only() {
        let result = EngagementSignalDetector::evaluate(
            "We help you and your team. Contact us. Yours truly, usually.",
            "you you you",
        );
        // we, you, your, us
        assert_eq!(result.conversational_score, 4);
    }

    #[test]
    fn empty_inputs_have_no_signals() {
        let result = EngagementSignalDetector::evaluate("", "");
        assert_eq!(result, EngagementResult::default());
    }
}
