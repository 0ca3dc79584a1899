use dashmap::DashMap;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

use crate::domain::models::{PageRecord, ScoreReport};
use crate::service::auditor::{AuditAggregator, AuditRecord};
use crate::service::scoring::ScoringEngine;

/// Audit and score computed for one version of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedScore {
    pub fingerprint: u64,
    pub audit: AuditRecord,
    pub score: ScoreReport,
}

/// Memoizes audit+score per page id. An entry is reused only while the
/// page's serialized fingerprint is unchanged.
pub struct ScoreCache {
    entries: Arc<DashMap<String, CachedScore>>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::with_capacity(16)),
        }
    }

    pub fn fingerprint(page: &PageRecord) -> u64 {
        let bytes = serde_json::to_vec(page).unwrap_or_default();
        xxh3_64(&bytes)
    }

    pub fn get_or_score(&self, page: &PageRecord) -> CachedScore {
        let key = page.id_or_unknown().to_string();
        let fingerprint = Self::fingerprint(page);

        if let Some(hit) = self.entries.get(&key) {
            if hit.fingerprint == fingerprint {
                tracing::debug!(page_id = %key, "score cache hit");
                return hit.value().clone();
            }
        }

        let audit = AuditAggregator::audit(page);
        let score = ScoringEngine::score(page, &audit);
        let cached = CachedScore {
            fingerprint,
            audit,
            score,
        };
        self.entries.insert(key, cached.clone());
        cached
    }

    pub fn invalidate(&self, page_id: &str) {
        self.entries.remove(page_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}
