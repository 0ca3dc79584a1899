use std::ops::RangeInclusive;

use super::types::MetaQualityResult;

/// Ideal title length in characters.
pub const TITLE_GOOD_RANGE: RangeInclusive<usize> = 50..=65;
/// Ideal meta description length in characters.
pub const META_GOOD_RANGE: RangeInclusive<usize> = 120..=160;

pub struct MetaQualityChecker;

impl MetaQualityChecker {
    /// Checks trimmed title and meta description lengths against the ideal ranges.
    pub fn evaluate(title: &str, meta_description: &str) -> MetaQualityResult {
        let title_length = char_len(title);
        let meta_description_length = char_len(meta_description);

        MetaQualityResult {
            title_length,
            meta_description_length,
            title_good: TITLE_GOOD_RANGE.contains(&title_length),
            meta_good: META_GOOD_RANGE.contains(&meta_description_length),
        }
    }
}

/// Character (not byte) length of the trimmed text.
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}
