//! Per-keyword occurrence counts and density against the normalized word count.

use indexmap::IndexMap;
use regex::Regex;

use super::text_metrics::TextMetrics;
use super::types::{round2, KeywordDensityEntry, KeywordDensityResult};

pub struct KeywordDensityAnalyzer;

impl KeywordDensityAnalyzer {
    /// Counts whole-phrase occurrences of each keyword in `content`.
    ///
    /// Entries are keyed by the keyword exactly as given; a repeated keyword
    /// overwrites its earlier entry in place.
    pub fn compute<S: AsRef<str>>(content: &str, keywords: &[S]) -> KeywordDensityResult {
        let content_clean = TextMetrics::normalize(content);
        let total_words = TextMetrics::word_count(&content_clean);

        let mut keyword_density = IndexMap::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.as_ref();
            let count = Self::phrase_occurrences(&content_clean, &TextMetrics::normalize(keyword));
            let density = if total_words > 0 {
                count as f64 / total_words as f64 * 100.0
            } else {
                0.0
            };
            keyword_density.insert(
                keyword.to_string(),
                KeywordDensityEntry {
                    count,
                    density_percent: round2(density),
                },
            );
        }

        tracing::debug!(total_words, keywords = keywords.len(), "keyword density computed");

        KeywordDensityResult {
            total_words,
            keyword_density,
        }
    }

    /// Non-overlapping occurrences of `phrase` anchored on word boundaries.
    /// An empty phrase never matches.
    pub fn phrase_occurrences(haystack: &str, phrase: &str) -> usize {
        // `\b\b` alone would match at every word boundary
        if phrase.is_empty() {
            return 0;
        }
        let pattern = format!(r"\b{}\b", regex::escape(phrase));
        match Regex::new(&pattern) {
            Ok(re) => re.find_iter(haystack).count(),
            Err(e) => {
                tracing::warn!("Unusable keyword pattern {:?}: {}", phrase, e);
                0
            }
        }
    }
}
