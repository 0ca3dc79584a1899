//! Shared types for audit results.
//!
//! Field names are part of the report format; report renderers read these
//! keys directly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Occurrences of one keyword phrase in the page content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensityEntry {
    pub count: usize,
    pub density_percent: f64,
}

/// Keyword density for every target keyword, keyed by the keyword as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensityResult {
    pub total_words: usize,
    pub keyword_density: IndexMap<String, KeywordDensityEntry>,
}

impl KeywordDensityResult {
    /// Entry for `keyword`, or a zero entry when it was not analyzed.
    pub fn entry_or_zero(&self, keyword: &str) -> KeywordDensityEntry {
        self.keyword_density
            .get(keyword)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaQualityResult {
    pub title_length: usize,
    pub meta_description_length: usize,
    pub title_good: bool,
    pub meta_good: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAuditResult {
    pub h1_present: bool,
    pub h2_count: usize,
    pub h3_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub easy_to_read: bool,
}

impl ReadabilityResult {
    /// Rounds both scores. The easy-to-read flag is taken from the unrounded
    /// values, so 59.996 is not easy even though it is reported as 60.0.
    pub fn new(reading_ease: f64, grade_level: f64) -> Self {
        Self {
            flesch_reading_ease: round2(reading_ease),
            flesch_kincaid_grade: round2(grade_level.max(0.0)),
            easy_to_read: reading_ease >= 60.0 && grade_level <= 9.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementResult {
    pub cta_present: bool,
    pub cta_phrases_found: Vec<String>,
    pub conversational_score: usize,
}

/// Everything the analyzers found on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub keyword_density: KeywordDensityResult,
    pub meta_quality: MetaQualityResult,
    pub headings_audit: HeadingAuditResult,
    pub readability: ReadabilityResult,
    pub engagement: EngagementResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(1.0 / 3.0 * 100.0), 33.33);
        assert_eq!(round2(-12.345678), -12.35);
    }

    #[test]
    fn easy_to_read_needs_both_thresholds() {
        assert!(ReadabilityResult::new(60.0, 9.0).easy_to_read);
        assert!(!ReadabilityResult::new(59.99, 5.0).easy_to_read);
        assert!(!ReadabilityResult::new(80.0, 9.01).easy_to_read);
    }

    #[test]
    fn easy_to_read_ignores_rounding() {
        let borderline = ReadabilityResult::new(59.996, 5.0);
        assert_eq!(borderline.flesch_reading_ease, 60.0);
        assert!(!borderline.easy_to_read);

        let grade = ReadabilityResult::new(75.0, 9.004);
        assert_eq!(grade.flesch_kincaid_grade, 9.0);
        assert!(!grade.easy_to_read);
    }

    #[test]
    fn grade_level_is_never_negative() {
        let result = ReadabilityResult::new(206.835, -15.59);
        assert_eq!(result.flesch_kincaid_grade, 0.0);
        assert!(result.flesch_reading_ease.is_finite());
    }

    #[test]
    fn missing_keyword_reads_as_zero() {
        let result = KeywordDensityResult::default();
        let entry = result.entry_or_zero("power bi");
        assert_eq!(entry.count, 0);
        assert_eq!(entry.density_percent, 0.0);
    }

    #[test]
    fn audit_record_uses_report_field_names() {
        let value = serde_json::to_value(AuditRecord::default()).unwrap();
        for key in ["keyword_density", "meta_quality", "headings_audit", "readability", "engagement"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["keyword_density"].get("total_words").is_some());
        assert!(value["engagement"].get("cta_phrases_found").is_some());
    }
}
