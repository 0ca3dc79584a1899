//! SEO score out of 100.
//!
//! Six independent sub-scores, each capped at its own maximum:
//!
//! | metric          | max | input                               |
//! |-----------------|-----|-------------------------------------|
//! | readability     | 20  | Flesch ease + Flesch-Kincaid grade  |
//! | keyword_match   | 20  | primary keyword density             |
//! | title_appeal    | 20  | title length + primary keyword      |
//! | meta_length     | 15  | meta description length             |
//! | link_structure  | 15  | URL / internal path tokens          |
//! | cta_presence    | 10  | detected call-to-action             |

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::models::{MetricKind, PageRecord, ScoreBreakdownEntry, ScoreReport};
use crate::service::auditor::{
    char_len, AuditRecord, EngagementResult, KeywordDensityResult, MetaQualityResult,
    ReadabilityResult,
};

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+|/services/\S+|/blog/\S+").unwrap())
}

/// Formats a float the way the report has always shown it: whole numbers
/// keep one decimal ("65.0"), everything else prints its shortest form.
fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a page from its audit record. Pure: the same pair always
    /// yields the same report.
    pub fn score(page: &PageRecord, audit: &AuditRecord) -> ScoreReport {
        let entries = [
            (MetricKind::Readability, Self::score_readability(&audit.readability)),
            (
                MetricKind::KeywordMatch,
                Self::score_keyword_match(&audit.keyword_density, &page.primary_keyword),
            ),
            (
                MetricKind::TitleAppeal,
                Self::score_title_appeal(&page.title, &page.primary_keyword),
            ),
            (MetricKind::MetaLength, Self::score_meta_length(&audit.meta_quality)),
            (MetricKind::LinkStructure, Self::score_link_structure(&page.content)),
            (MetricKind::CtaPresence, Self::score_cta_presence(&audit.engagement)),
        ];

        let total: u32 = entries.iter().map(|(_, e)| e.score).sum();
        let total_score = total.min(100);

        tracing::debug!(page_id = %page.page_id, total_score, "page scored");

        ScoreReport {
            total_score,
            breakdown: BTreeMap::from(entries),
        }
    }

    pub fn score_readability(readability: &ReadabilityResult) -> ScoreBreakdownEntry {
        let flesch = readability.flesch_reading_ease;
        let grade = readability.flesch_kincaid_grade;

        let ease_points = if flesch >= 60.0 {
            10
        } else if flesch >= 45.0 {
            6
        } else if flesch >= 30.0 {
            3
        } else {
            1
        };

        // lower grade is better
        let grade_points = if grade <= 9.0 {
            10
        } else if grade <= 12.0 {
            6
        } else if grade <= 16.0 {
            3
        } else {
            1
        };

        ScoreBreakdownEntry::new(
            MetricKind::Readability,
            ease_points + grade_points,
            format!("Flesch={}, Grade={}", fmt_float(flesch), fmt_float(grade)),
        )
    }

    /// Density bands for the primary keyword only, first match wins.
    /// Densities in (0, 0.2) and above 4.0 land in the catch-all band.
    pub fn score_keyword_match(
        keyword_audit: &KeywordDensityResult,
        primary_keyword: &str,
    ) -> ScoreBreakdownEntry {
        let kind = MetricKind::KeywordMatch;

        if keyword_audit.total_words == 0 {
            return ScoreBreakdownEntry::new(kind, 0, "No content words found");
        }

        let density = keyword_audit.entry_or_zero(primary_keyword).density_percent;
        let shown = fmt_float(density);

        let (score, reason) = if (0.5..=2.5).contains(&density) {
            (20, format!("Primary keyword density ideal ({}%)", shown))
        } else if (0.2..0.5).contains(&density) {
            (12, format!("Primary keyword density low ({}%)", shown))
        } else if density > 2.5 && density <= 4.0 {
            (12, format!("Primary keyword density slightly high ({}%)", shown))
        } else if density == 0.0 {
            (0, "Primary keyword not found in content".to_string())
        } else {
            (6, format!("Primary keyword density not optimal ({}%)", shown))
        };

        ScoreBreakdownEntry::new(kind, score, reason)
    }

    pub fn score_title_appeal(title: &str, primary_keyword: &str) -> ScoreBreakdownEntry {
        let title_clean = title.trim();
        let length = char_len(title_clean);

        let (length_points, length_reason) = if (50..=65).contains(&length) {
            (10, format!("Length good ({})", length))
        } else if (40..50).contains(&length) || (66..=80).contains(&length) {
            (6, format!("Length acceptable ({})", length))
        } else {
            (2, format!("Length poor ({})", length))
        };

        let keyword_present = title_clean
            .to_lowercase()
            .contains(&primary_keyword.to_lowercase());
        let (keyword_points, keyword_reason) = if keyword_present {
            (10, "Primary keyword present")
        } else {
            (0, "Primary keyword missing")
        };

        ScoreBreakdownEntry::new(
            MetricKind::TitleAppeal,
            length_points + keyword_points,
            format!("{}, {}", length_reason, keyword_reason),
        )
    }

    pub fn score_meta_length(meta_quality: &MetaQualityResult) -> ScoreBreakdownEntry {
        let kind = MetricKind::MetaLength;
        let meta_len = meta_quality.meta_description_length;

        if (120..=160).contains(&meta_len) {
            ScoreBreakdownEntry::new(kind, 15, format!("Meta length ideal ({})", meta_len))
        } else if (100..120).contains(&meta_len) || (161..=180).contains(&meta_len) {
            ScoreBreakdownEntry::new(kind, 10, format!("Meta length okay ({})", meta_len))
        } else if meta_len == 0 {
            ScoreBreakdownEntry::new(kind, 0, "Meta description missing")
        } else {
            ScoreBreakdownEntry::new(kind, 5, format!("Meta length poor ({})", meta_len))
        }
    }

    /// Number of link-like tokens in the raw content.
    pub fn count_links(content: &str) -> usize {
        link_re().find_iter(content).count()
    }

    pub fn score_link_structure(content: &str) -> ScoreBreakdownEntry {
        let kind = MetricKind::LinkStructure;
        let link_count = Self::count_links(content);

        match link_count {
            0 => ScoreBreakdownEntry::new(
                kind,
                3,
                "No links detected (consider adding internal links)",
            ),
            1 => ScoreBreakdownEntry::new(kind, 6, format!("Low links ({})", link_count)),
            2 => ScoreBreakdownEntry::new(kind, 10, format!("Some links ({})", link_count)),
            _ => ScoreBreakdownEntry::new(kind, 15, format!("Good links ({})", link_count)),
        }
    }

    pub fn score_cta_presence(engagement: &EngagementResult) -> ScoreBreakdownEntry {
        if engagement.cta_present {
            ScoreBreakdownEntry::new(MetricKind::CtaPresence, 10, "CTA present")
        } else {
            ScoreBreakdownEntry::new(MetricKind::CtaPresence, 0, "CTA missing")
        }
    }
}
