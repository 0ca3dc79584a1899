//! On-page SEO analyzers.
//!
//! Each analyzer is a pure function over part of a [`PageRecord`]:
//! - **TextMetrics**: normalization, word counts, Flesch readability
//! - **KeywordDensityAnalyzer**: whole-phrase keyword counts and density
//! - **MetaQualityChecker**: title / meta description length ranges
//! - **HeadingStructureChecker**: h1 presence, h2/h3 counts
//! - **EngagementSignalDetector**: CTA phrases and conversational tone
//!
//! [`AuditAggregator`] runs all of them against one page.

mod engagement;
mod headings;
mod keyword_density;
mod meta_quality;
mod text_metrics;
mod types;

pub use engagement::{EngagementSignalDetector, CONVERSATIONAL_WORDS, CTA_PHRASES};
pub use headings::HeadingStructureChecker;
pub use keyword_density::KeywordDensityAnalyzer;
pub use meta_quality::{char_len, MetaQualityChecker, META_GOOD_RANGE, TITLE_GOOD_RANGE};
pub use text_metrics::TextMetrics;
pub use types::*;

use crate::domain::models::PageRecord;

pub struct AuditAggregator;

impl AuditAggregator {
    /// Runs every analyzer against `page`. The analyzers are independent of
    /// each other, and each degrades to zero/empty/false on empty fields.
    pub fn audit(page: &PageRecord) -> AuditRecord {
        let record = AuditRecord {
            keyword_density: KeywordDensityAnalyzer::compute(&page.content, &page.target_keywords),
            meta_quality: MetaQualityChecker::evaluate(&page.title, &page.meta_description),
            headings_audit: HeadingStructureChecker::evaluate(&page.headings),
            readability: TextMetrics::readability_stats(&page.content),
            engagement: EngagementSignalDetector::evaluate(&page.content, &page.cta),
        };

        tracing::debug!(
            page_id = %page.page_id,
            total_words = record.keyword_density.total_words,
            cta_present = record.engagement.cta_present,
            "page audited"
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::HeadingStructure;

    #[test]
    fn empty_page_audits_to_defaults() {
        let audit = AuditAggregator::audit(&PageRecord::default());
        assert_eq!(audit.keyword_density.total_words, 0);
        assert!(audit.keyword_density.keyword_density.is_empty());
        assert_eq!(audit.meta_quality, MetaQualityResult::default());
        assert_eq!(audit.headings_audit, HeadingAuditResult::default());
        assert_eq!(audit.engagement, EngagementResult::default());
        assert!(audit.readability.flesch_reading_ease.is_finite());
    }

    #[test]
    fn each_section_reads_its_own_fields() {
        let page = PageRecord {
            target_keywords: vec!["dashboards".into()],
            title: "Dashboards".into(),
            meta_description: "Short".into(),
            headings: HeadingStructure {
                h1: "Dashboards".into(),
                h2: vec!["Why".into()],
                h3: vec![],
            },
            content: "We build dashboards for you.".into(),
            cta: "Get started".into(),
            ..Default::default()
        };

        let audit = AuditAggregator::audit(&page);
        assert_eq!(audit.keyword_density.total_words, 5);
        assert_eq!(audit.keyword_density.keyword_density["dashboards"].count, 1);
        assert_eq!(audit.meta_quality.title_length, 10);
        assert_eq!(audit.meta_quality.meta_description_length, 5);
        assert!(audit.headings_audit.h1_present);
        assert_eq!(audit.headings_audit.h2_count, 1);
        assert_eq!(audit.engagement.cta_phrases_found, vec!["get started"]);
        assert_eq!(audit.engagement.conversational_score, 2);
    }

    #[test]
    fn audit_is_idempotent() {
        let page = PageRecord {
            content: "Contact us today for a free consultation.".into(),
            target_keywords: vec!["consultation".into()],
            ..Default::default()
        };
        assert_eq!(AuditAggregator::audit(&page), AuditAggregator::audit(&page));
    }
}
