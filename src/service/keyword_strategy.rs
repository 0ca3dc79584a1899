//! Keyword strategy: extraction, clustering, trending and long-tail suggestions.
//!
//! Extraction is delegated to a [`KeywordExtractor`]; embedding-based models
//! plug in behind that trait. [`FrequencyKeywordExtractor`] is the built-in
//! deterministic fallback.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::models::PageRecord;
use crate::service::auditor::TextMetrics;

/// Default number of keywords extracted per page.
pub const DEFAULT_TOP_N: usize = 10;

/// Name of the catch-all cluster.
pub const OTHER_CLUSTER: &str = "Other";

/// Service clusters, checked in order; a keyword joins the first one with a
/// matching term.
pub const KEYWORD_CLUSTERS: [(&str, &[&str]); 3] = [
    (
        "Power BI Services",
        &[
            "power bi",
            "dashboard",
            "dax",
            "kpi",
            "reporting",
            "business intelligence",
            "data modeling",
            "visualization",
        ],
    ),
    (
        "AI Integration",
        &[
            "ai",
            "automation",
            "azure openai",
            "chatbot",
            "agents",
            "nlp",
            "machine learning",
            "genai",
        ],
    ),
    (
        "Data Analytics",
        &[
            "analytics",
            "insights",
            "kpi",
            "data strategy",
            "data cleaning",
            "etl",
            "reporting",
            "visualization",
        ],
    ),
];

/// Simulated trending long-tail searches per page category.
pub fn trending_keywords(category: PageCategory) -> &'static [&'static str] {
    match category {
        PageCategory::PowerBi => &[
            "Power BI dashboard examples",
            "Power BI DAX optimization",
            "Power BI vs Tableau 2026",
            "Power BI KPI dashboard",
            "Power BI data modeling best practices",
        ],
        PageCategory::AiIntegration => &[
            "Azure OpenAI integration",
            "AI workflow automation",
            "enterprise chatbot solutions",
            "Generative AI for business",
            "AI agents for customer support",
        ],
        PageCategory::DataAnalytics => &[
            "data analytics consulting",
            "business intelligence strategy",
            "data storytelling dashboards",
            "predictive analytics for business",
            "data governance best practices",
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageCategory {
    PowerBi,
    AiIntegration,
    DataAnalytics,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageCategory::PowerBi => "power_bi",
            PageCategory::AiIntegration => "ai_integration",
            PageCategory::DataAnalytics => "data_analytics",
        }
    }

    /// Category guess from the primary keyword, falling back to the page id.
    pub fn guess(page: &PageRecord) -> Self {
        let primary = page.primary_keyword.to_lowercase();
        let pid = page.page_id.to_lowercase();

        if primary.contains("power bi") || pid.contains("powerbi") {
            PageCategory::PowerBi
        } else if primary.contains("ai") || primary.contains("integration") || pid.contains("ai_") {
            PageCategory::AiIntegration
        } else {
            PageCategory::DataAnalytics
        }
    }
}

/// A ranked phrase from a keyword extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedKeyword {
    pub keyword: String,
    pub score: f64,
}

impl ExtractedKeyword {
    /// Score is kept to four decimals.
    pub fn new(keyword: impl Into<String>, score: f64) -> Self {
        Self {
            keyword: keyword.into(),
            score: (score * 10_000.0).round() / 10_000.0,
        }
    }
}

/// Opaque keyword ranking capability.
pub trait KeywordExtractor: Send + Sync {
    /// Up to `top_n` phrases, best first. Blank text yields nothing.
    fn extract(&self, text: &str, top_n: usize) -> Vec<ExtractedKeyword>;

    fn name(&self) -> &'static str;
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[\w][\w'-]*\b").unwrap())
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "get", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "us", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours",
];

/// Ranks 1-3 word phrases by weighted frequency after dropping stop words.
#[derive(Debug, Clone, Default)]
pub struct FrequencyKeywordExtractor;

impl FrequencyKeywordExtractor {
    const MAX_NGRAM: usize = 3;
}

impl KeywordExtractor for FrequencyKeywordExtractor {
    fn extract(&self, text: &str, top_n: usize) -> Vec<ExtractedKeyword> {
        if text.trim().is_empty() || top_n == 0 {
            return Vec::new();
        }

        let normalized = TextMetrics::normalize(text);
        let tokens: Vec<&str> = token_re()
            .find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|t| !STOP_WORDS.contains(t) && t.chars().any(char::is_alphabetic))
            .collect();

        let mut weights: HashMap<String, usize> = HashMap::new();
        for n in 1..=Self::MAX_NGRAM {
            for window in tokens.windows(n) {
                *weights.entry(window.join(" ")).or_default() += n;
            }
        }

        let Some(max_weight) = weights.values().copied().max() else {
            return Vec::new();
        };

        let mut ranked: Vec<(String, usize)> = weights.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(phrase, weight)| ExtractedKeyword::new(phrase, weight as f64 / max_weight as f64))
            .collect()
    }

    fn name(&self) -> &'static str {
        "frequency"
    }
}

/// Places keywords into the service clusters; unmatched ones go to "Other".
/// Every cluster key is present, in fixed order, even when empty.
pub fn cluster_keywords(extracted: &[ExtractedKeyword]) -> IndexMap<String, Vec<ExtractedKeyword>> {
    let mut clusters: IndexMap<String, Vec<ExtractedKeyword>> = KEYWORD_CLUSTERS
        .iter()
        .map(|(name, _)| (name.to_string(), Vec::new()))
        .chain(std::iter::once((OTHER_CLUSTER.to_string(), Vec::new())))
        .collect();

    for item in extracted {
        let keyword = item.keyword.to_lowercase();
        let cluster = KEYWORD_CLUSTERS
            .iter()
            .find(|(_, terms)| terms.iter().any(|term| keyword.contains(term)))
            .map(|(name, _)| *name)
            .unwrap_or(OTHER_CLUSTER);

        if let Some(bucket) = clusters.get_mut(cluster) {
            bucket.push(item.clone());
        }
    }

    clusters
}

/// Rule-based long-tail variants of the primary keyword.
pub fn long_tail_keywords(primary_keyword: &str) -> Vec<String> {
    let pk = primary_keyword.trim();
    if pk.is_empty() {
        return Vec::new();
    }

    vec![
        format!("best {} for small business", pk),
        format!("{} cost in 2026", pk),
        format!("{} for startups", pk),
        format!("{} with implementation support", pk),
        format!("enterprise {} solutions", pk),
        format!("{} near me", pk),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStrategy {
    pub extracted_keywords: Vec<ExtractedKeyword>,
    pub clusters: IndexMap<String, Vec<ExtractedKeyword>>,
    pub trending_keywords: Vec<String>,
    pub long_tail_keywords: Vec<String>,
}

/// Builds a [`KeywordStrategy`] for a page using an injected extractor.
#[derive(Clone)]
pub struct KeywordStrategist {
    extractor: Arc<dyn KeywordExtractor>,
    top_n: usize,
}

impl KeywordStrategist {
    pub fn new(extractor: Arc<dyn KeywordExtractor>, top_n: usize) -> Self {
        Self { extractor, top_n }
    }

    pub fn strategy_for_page(&self, page: &PageRecord) -> KeywordStrategy {
        let extracted_keywords = self.extractor.extract(&page.content, self.top_n);
        let clusters = cluster_keywords(&extracted_keywords);
        let category = PageCategory::guess(page);

        tracing::debug!(
            page_id = %page.page_id,
            extractor = self.extractor.name(),
            extracted = extracted_keywords.len(),
            category = category.as_str(),
            "keyword strategy built"
        );

        KeywordStrategy {
            extracted_keywords,
            clusters,
            trending_keywords: trending_keywords(category).iter().map(|s| s.to_string()).collect(),
            long_tail_keywords: long_tail_keywords(&page.primary_keyword),
        }
    }
}

impl Default for KeywordStrategist {
    fn default() -> Self {
        Self::new(Arc::new(FrequencyKeywordExtractor), DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_id: &str, primary: &str) -> PageRecord {
        PageRecord {
            page_id: page_id.into(),
            primary_keyword: primary.into(),
            ..Default::default()
        }
    }

    #[test]
    fn category_guess_prefers_primary_keyword() {
        assert_eq!(PageCategory::guess(&page("x", "Power BI services")), PageCategory::PowerBi);
        assert_eq!(PageCategory::guess(&page("service_powerbi", "")), PageCategory::PowerBi);
        assert_eq!(PageCategory::guess(&page("x", "AI automation")), PageCategory::AiIntegration);
        assert_eq!(PageCategory::guess(&page("blog_ai_x", "")), PageCategory::AiIntegration);
        assert_eq!(
            PageCategory::guess(&page("x", "data analytics consulting")),
            PageCategory::DataAnalytics
        );
    }

    #[test]
    fn category_guess_matches_ai_as_substring() {
        // "ai" inside "maintenance" still counts
        assert_eq!(PageCategory::guess(&page("x", "maintenance")), PageCategory::AiIntegration);
    }

    #[test]
    fn clusters_take_first_matching_group() {
        let extracted = vec![
            ExtractedKeyword::new("KPI reporting", 0.9),
            ExtractedKeyword::new("chatbot rollout", 0.8),
            ExtractedKeyword::new("etl pipelines", 0.7),
            ExtractedKeyword::new("cloud migration", 0.6),
        ];
        let clusters = cluster_keywords(&extracted);

        assert_eq!(
            clusters.keys().collect::<Vec<_>>(),
            vec!["Power BI Services", "AI Integration", "Data Analytics", "Other"]
        );
        assert_eq!(clusters["Power BI Services"][0].keyword, "KPI reporting");
        assert_eq!(clusters["AI Integration"][0].keyword, "chatbot rollout");
        assert_eq!(clusters["Data Analytics"][0].keyword, "etl pipelines");
        assert_eq!(clusters["Other"][0].keyword, "cloud migration");
    }

    #[test]
    fn long_tail_uses_trimmed_primary_keyword() {
        let suggestions = long_tail_keywords("  AI automation ");
        assert_eq!(suggestions.len(), 6);
        assert_eq!(suggestions[0], "best AI automation for small business");
        assert_eq!(suggestions[5], "AI automation near me");
        assert!(long_tail_keywords("   ").is_empty());
    }

    #[test]
    fn frequency_extractor_ranks_repeated_phrases_first() {
        let text = "Power BI dashboards help teams. Our Power BI dashboards refresh fast. \
                    Teams love Power BI.";
        let keywords = FrequencyKeywordExtractor.extract(text, 3);
        assert_eq!(keywords.len(), 3);
        // "power bi" (3 x 2) ties "power bi dashboards" (2 x 3); ties sort by phrase
        assert_eq!(keywords[0].keyword, "power bi");
        assert_eq!(keywords[1].keyword, "power bi dashboards");
        assert_eq!(keywords[0].score, 1.0);
        assert_eq!(keywords[1].score, 1.0);
        assert_eq!(keywords[2].keyword, "bi dashboards");
        assert!(keywords.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn frequency_extractor_skips_stop_words_and_blank_text() {
        assert!(FrequencyKeywordExtractor.extract("   ", 5).is_empty());
        assert!(FrequencyKeywordExtractor.extract("the and of to", 5).is_empty());
        let keywords = FrequencyKeywordExtractor.extract("the analytics", 5);
        assert_eq!(keywords, vec![ExtractedKeyword::new("analytics", 1.0)]);
    }

    #[test]
    fn strategy_combines_all_sections() {
        let page = PageRecord {
            page_id: "blog_powerbi_dashboards".into(),
            primary_keyword: "Power BI dashboards".into(),
            content: "Power BI dashboards turn KPI data into decisions.".into(),
            ..Default::default()
        };
        let strategy = KeywordStrategist::default().strategy_for_page(&page);
        assert!(!strategy.extracted_keywords.is_empty());
        assert_eq!(strategy.trending_keywords[0], "Power BI dashboard examples");
        assert_eq!(strategy.long_tail_keywords.len(), 6);
        assert_eq!(strategy.clusters.len(), 4);
    }
}
