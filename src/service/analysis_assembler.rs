//! ReportAssembler - runs the analysis pipeline for one page and builds the
//! exportable report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{PageRecord, ScoreReport};
use crate::error::{AppError, ErrorMessage, Result};
use crate::service::auditor::AuditRecord;
use crate::service::keyword_strategy::{KeywordStrategist, KeywordStrategy};
use crate::service::optimizer::{ContentOptimizer, EngagementPlan, SeoOptimization};
use crate::service::score_cache::ScoreCache;

const REPORT_FILE_PREFIX: &str = "seo_report_";

/// Complete per-page report. AI sections are `null` when generation was
/// not requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub page: PageRecord,
    pub seo_audit: AuditRecord,
    pub seo_score: ScoreReport,
    pub keyword_strategy: KeywordStrategy,
    pub ai_optimization: Option<SeoOptimization>,
    pub engagement_plan: Option<EngagementPlan>,
    pub generated_at: DateTime<Utc>,
}

impl FinalReport {
    pub fn file_name(&self) -> String {
        format!("{}{}.json", REPORT_FILE_PREFIX, self.page.id_or_unknown())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report into `dir` (created if needed) and returns the path.
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::io(dir.display().to_string(), e))?;

        let path = dir.join(self.file_name());
        let json = self.to_json_pretty()?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;

        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}

pub struct ReportAssembler {
    strategist: KeywordStrategist,
    cache: ScoreCache,
    optimizer: Option<ContentOptimizer>,
}

impl ReportAssembler {
    pub fn new(strategist: KeywordStrategist) -> Self {
        Self {
            strategist,
            cache: ScoreCache::new(),
            optimizer: None,
        }
    }

    /// Enables the AI optimization and engagement plan sections.
    pub fn with_optimizer(mut self, optimizer: ContentOptimizer) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Audit and score for `page`, memoized until the page changes.
    pub fn score(&self, page: &PageRecord) -> (AuditRecord, ScoreReport) {
        let cached = self.cache.get_or_score(page);
        (cached.audit, cached.score)
    }

    pub async fn assemble(&self, page: &PageRecord) -> FinalReport {
        self.assemble_at(page, Utc::now()).await
    }

    /// Same as [`assemble`](Self::assemble) with a fixed timestamp.
    pub async fn assemble_at(&self, page: &PageRecord, generated_at: DateTime<Utc>) -> FinalReport {
        let (seo_audit, seo_score) = self.score(page);
        let keyword_strategy = self.strategist.strategy_for_page(page);

        let (ai_optimization, engagement_plan) = match &self.optimizer {
            Some(optimizer) => {
                let (optimization, plan) = optimizer.generate_all(page).await;
                (
                    Some(optimization.unwrap_or_else(|e| failed_optimization(page, &e))),
                    Some(plan.unwrap_or_else(|e| failed_plan(page, &e))),
                )
            }
            None => (None, None),
        };

        tracing::info!(
            page_id = %page.page_id,
            total_score = seo_score.total_score,
            with_ai = ai_optimization.is_some(),
            "report assembled"
        );

        FinalReport {
            page: page.clone(),
            seo_audit,
            seo_score,
            keyword_strategy,
            ai_optimization,
            engagement_plan,
            generated_at,
        }
    }
}

// A generation failure leaves the rest of the report intact.
fn failed_optimization(page: &PageRecord, error: &AppError) -> SeoOptimization {
    tracing::warn!(page_id = %page.page_id, "SEO optimization failed: {}", error);
    SeoOptimization {
        error: Some(ErrorMessage::from(error).0),
        ..Default::default()
    }
}

fn failed_plan(page: &PageRecord, error: &AppError) -> EngagementPlan {
    tracing::warn!(page_id = %page.page_id, "Engagement plan failed: {}", error);
    EngagementPlan {
        error: Some(ErrorMessage::from(error).0),
        ..Default::default()
    }
}
