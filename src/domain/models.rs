//! Page and score entities shared across the audit pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::adapters::{lenient_string, lenient_string_list};

// ====== Input record ======

/// Heading outline of a page: one top-level heading plus ordered h2/h3 lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingStructure {
    #[serde(deserialize_with = "lenient_string")]
    pub h1: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub h2: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub h3: Vec<String>,
}

/// A page as delivered by the page dataset. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub page_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub primary_keyword: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub target_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub meta_description: String,
    pub headings: HeadingStructure,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cta: String,
}

impl PageRecord {
    /// Identifier used for cache keys and report file names.
    pub fn id_or_unknown(&self) -> &str {
        if self.page_id.is_empty() {
            "unknown"
        } else {
            &self.page_id
        }
    }
}

// ====== Score report ======

/// The six fixed scoring metrics, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Readability,
    KeywordMatch,
    TitleAppeal,
    MetaLength,
    LinkStructure,
    CtaPresence,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Readability,
        MetricKind::KeywordMatch,
        MetricKind::TitleAppeal,
        MetricKind::MetaLength,
        MetricKind::LinkStructure,
        MetricKind::CtaPresence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Readability => "readability",
            MetricKind::KeywordMatch => "keyword_match",
            MetricKind::TitleAppeal => "title_appeal",
            MetricKind::MetaLength => "meta_length",
            MetricKind::LinkStructure => "link_structure",
            MetricKind::CtaPresence => "cta_presence",
        }
    }

    /// Maximum points for this metric. The six maxima sum to 100.
    pub fn out_of(&self) -> u32 {
        match self {
            MetricKind::Readability => 20,
            MetricKind::KeywordMatch => 20,
            MetricKind::TitleAppeal => 20,
            MetricKind::MetaLength => 15,
            MetricKind::LinkStructure => 15,
            MetricKind::CtaPresence => 10,
        }
    }
}

/// One line of the score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdownEntry {
    pub score: u32,
    pub out_of: u32,
    pub reason: String,
}

impl ScoreBreakdownEntry {
    /// Builds an entry for `kind`, clamping `score` to the metric maximum.
    pub fn new(kind: MetricKind, score: u32, reason: impl Into<String>) -> Self {
        let out_of = kind.out_of();
        Self {
            score: score.min(out_of),
            out_of,
            reason: reason.into(),
        }
    }
}

/// Total score plus per-metric breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_score: u32,
    pub breakdown: BTreeMap<MetricKind, ScoreBreakdownEntry>,
}

impl ScoreReport {
    pub fn entry(&self, kind: MetricKind) -> Option<&ScoreBreakdownEntry> {
        self.breakdown.get(&kind)
    }

    /// Score for `kind`, 0 when the metric is absent.
    pub fn score_of(&self, kind: MetricKind) -> u32 {
        self.entry(kind).map(|e| e.score).unwrap_or(0)
    }
}
