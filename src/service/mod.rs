pub mod analysis_assembler;
pub mod auditor;
pub mod generation;
pub mod keyword_strategy;
pub mod optimizer;
pub mod score_cache;
pub mod scoring;

pub use analysis_assembler::{FinalReport, ReportAssembler};
pub use auditor::{AuditAggregator, AuditRecord};
pub use generation::{GeminiClient, GenerationRequest, TextGenerator};
pub use keyword_strategy::{FrequencyKeywordExtractor, KeywordExtractor, KeywordStrategist, KeywordStrategy};
pub use optimizer::{ContentOptimizer, EngagementPlan, SeoOptimization};
pub use score_cache::ScoreCache;
pub use scoring::ScoringEngine;

use crate::domain::models::{PageRecord, ScoreReport};

/// Full audit-then-score pipeline for one page, uncached.
pub fn analyze_page(page: &PageRecord) -> (AuditRecord, ScoreReport) {
    let audit = AuditAggregator::audit(page);
    let score = ScoringEngine::score(page, &audit);
    (audit, score)
}
