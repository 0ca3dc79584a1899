//! AI copy optimization and engagement planning.
//!
//! Both operations build a prompt from the page, ask the injected
//! [`TextGenerator`] for a JSON answer and parse it. A reply that is not
//! valid JSON is not an error: the result comes back empty with `error` and
//! `raw_response` filled in so the report can still be produced.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::models::PageRecord;
use crate::error::Result;
use crate::service::generation::{GenerationRequest, TextGenerator};
use crate::settings::{PromptBlock, Settings, DEFAULT_SNIPPET_CHARS};

const OPTIMIZER_SYSTEM: &str = "You are a helpful AI SEO assistant.";
const PLANNER_SYSTEM: &str = "You generate actionable engagement and SEO strategies.";
const OPTIMIZER_TEMPERATURE: f32 = 0.6;
const PLANNER_TEMPERATURE: f32 = 0.7;

const DEFAULT_PERSONA: &str =
    "You are an SEO expert and conversion copywriter for an IT services company.";

// ====== Result types ======

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoOptimization {
    pub optimized_title: String,
    pub optimized_meta_description: String,
    pub optimized_intro: String,
    pub long_tail_keywords: Vec<String>,
    pub ctas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingSlot {
    pub day: String,
    pub time: String,
    pub content_type: String,
    pub title_idea: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementPlan {
    pub search_topics: Vec<String>,
    pub emotional_blog_titles: Vec<String>,
    pub two_week_posting_schedule: Vec<PostingSlot>,
    pub engagement_hooks: Vec<String>,
    pub conversion_ctas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Result types that can carry an unparseable model reply.
trait ParseFallback: DeserializeOwned + Default {
    fn failed(error: &str, raw_response: String) -> Self;
}

impl ParseFallback for SeoOptimization {
    fn failed(error: &str, raw_response: String) -> Self {
        Self {
            error: Some(error.to_string()),
            raw_response: Some(raw_response),
            ..Default::default()
        }
    }
}

impl ParseFallback for EngagementPlan {
    fn failed(error: &str, raw_response: String) -> Self {
        Self {
            error: Some(error.to_string()),
            raw_response: Some(raw_response),
            ..Default::default()
        }
    }
}

// ====== Simulated traffic ======

/// Weekly traffic shape fed to the engagement planner.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficPattern {
    pub high_traffic_days: &'static [&'static str],
    pub medium_traffic_days: &'static [&'static str],
    pub low_traffic_days: &'static [&'static str],
    pub peak_time_slots: &'static [&'static str],
    pub note: &'static str,
}

pub const SIMULATED_TRAFFIC_PATTERN: TrafficPattern = TrafficPattern {
    high_traffic_days: &["Monday", "Wednesday", "Friday"],
    medium_traffic_days: &["Tuesday", "Thursday"],
    low_traffic_days: &["Saturday", "Sunday"],
    peak_time_slots: &["11:00 AM - 02:00 PM", "07:00 PM - 09:00 PM"],
    note: "Based on simulated analytics: weekdays perform better; weekends lower engagement.",
};

// ====== JSON extraction ======

fn json_object_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").unwrap())
}

/// Pulls the JSON object out of a model reply: code fences are dropped, and
/// any prose around the outermost `{...}` span is discarded. Text with no
/// braces at all is returned unchanged.
pub fn extract_json(text: &str) -> String {
    let text = text.trim().replace("```json", "").replace("```", "");
    let text = text.trim();

    if text.starts_with('{') && text.ends_with('}') {
        return text.to_string();
    }

    json_object_re()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| text.to_string())
}

fn parse_reply<T: ParseFallback>(raw: &str, what: &str) -> T {
    let candidate = extract_json(raw);
    match serde_json::from_str::<T>(&candidate) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("{} reply was not valid JSON: {}", what, e);
            T::failed("Model did not return valid JSON", candidate)
        }
    }
}

// ====== Prompt variables ======

fn replace_vars(text: &str, page: &PageRecord) -> String {
    text.replace("{page_name}", &page.page_name)
        .replace("{page_type}", &page.page_type)
        .replace("{primary_keyword}", &page.primary_keyword)
        .replace("{url}", &page.url)
        .replace("{title}", &page.title)
}

fn snippet(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}

// ====== Optimizer ======

pub struct ContentOptimizer {
    generator: Arc<dyn TextGenerator>,
    persona: String,
    prompt_blocks: Vec<PromptBlock>,
    snippet_chars: usize,
}

impl ContentOptimizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            persona: DEFAULT_PERSONA.to_string(),
            prompt_blocks: Vec::new(),
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }

    /// Applies persona, extra prompt blocks and snippet length from settings.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Some(persona) = settings.gemini_persona.as_deref().filter(|p| !p.is_empty()) {
            self.persona = persona.to_string();
        }
        self.prompt_blocks = settings.prompt_blocks.clone();
        self.snippet_chars = settings.content_snippet_chars;
        self
    }

    /// User-configured requirement blocks, variables substituted.
    fn extra_requirements(&self, page: &PageRecord) -> String {
        let parts: Vec<String> = self
            .prompt_blocks
            .iter()
            .map(|block| replace_vars(&block.content, page))
            .filter(|text| !text.trim().is_empty())
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!("\nADDITIONAL REQUIREMENTS:\n{}\n", parts.join("\n\n"))
        }
    }

    pub fn optimization_prompt(&self, page: &PageRecord) -> String {
        format!(
            r#"{persona}

Page Name: {page_name}
Primary Keyword: {primary_keyword}

Existing Content:
{content}

TASKS:
1) Rewrite a better SEO-friendly Title (max 65 characters).
2) Write a better Meta Description (120-160 characters).
3) Write a strong Intro paragraph (70-90 words).
4) Suggest 8 long-tail keywords relevant to the page.
5) Generate 3 high-converting CTAs (short).
{extra}
Return ONLY valid JSON (no explanation, no extra text) in this format:
{{
  "optimized_title": "",
  "optimized_meta_description": "",
  "optimized_intro": "",
  "long_tail_keywords": [],
  "ctas": []
}}
"#,
            persona = replace_vars(&self.persona, page),
            page_name = page.page_name,
            primary_keyword = page.primary_keyword,
            content = page.content,
            extra = self.extra_requirements(page),
        )
    }

    pub fn engagement_prompt(&self, page: &PageRecord) -> String {
        let traffic = serde_json::to_string_pretty(&SIMULATED_TRAFFIC_PATTERN).unwrap_or_default();
        format!(
            r#"You are a digital marketing and SEO growth strategist.

Goal:
Improve customer engagement, increase organic traffic and conversions.

PAGE DETAILS:
- Page Name: {page_name}
- Primary Keyword: {primary_keyword}
- Content Snippet: {snippet}

SIMULATED TRAFFIC DATA:
{traffic}

TASKS:
1) Suggest 8 content topics users are likely searching for (related to this service/blog).
2) Suggest 10 blog post titles with emotional triggers (fear of missing out, urgency, curiosity, benefits).
3) Recommend a posting schedule for 2 weeks (day + time slot). Use the traffic pattern.
4) Suggest 5 engagement hooks (for intro lines / LinkedIn post opening).
5) Suggest 3 short conversion CTAs.
{extra}
Return ONLY valid JSON in this exact format:
{{
  "search_topics": [],
  "emotional_blog_titles": [],
  "two_week_posting_schedule": [
    {{
      "day": "",
      "time": "",
      "content_type": "",
      "title_idea": ""
    }}
  ],
  "engagement_hooks": [],
  "conversion_ctas": []
}}
"#,
            page_name = page.page_name,
            primary_keyword = page.primary_keyword,
            snippet = snippet(&page.content, self.snippet_chars),
            traffic = traffic,
            extra = self.extra_requirements(page),
        )
    }

    /// Optimized title, meta description, intro, long-tail keywords and CTAs.
    pub async fn generate_seo_optimization(&self, page: &PageRecord) -> Result<SeoOptimization> {
        let request = GenerationRequest {
            system: OPTIMIZER_SYSTEM.to_string(),
            prompt: self.optimization_prompt(page),
            temperature: OPTIMIZER_TEMPERATURE,
        };

        tracing::info!(page_id = %page.page_id, generator = self.generator.name(), "generating SEO optimization");
        let raw = self.generator.generate(&request).await?;
        Ok(parse_reply(&raw, "SEO optimization"))
    }

    /// Topics, emotional titles, a two-week schedule, hooks and CTAs.
    pub async fn generate_engagement_plan(&self, page: &PageRecord) -> Result<EngagementPlan> {
        let request = GenerationRequest {
            system: PLANNER_SYSTEM.to_string(),
            prompt: self.engagement_prompt(page),
            temperature: PLANNER_TEMPERATURE,
        };

        tracing::info!(page_id = %page.page_id, generator = self.generator.name(), "generating engagement plan");
        let raw = self.generator.generate(&request).await?;
        Ok(parse_reply(&raw, "Engagement plan"))
    }

    /// Runs both generations concurrently.
    pub async fn generate_all(&self, page: &PageRecord) -> (Result<SeoOptimization>, Result<EngagementPlan>) {
        tokio::join!(
            self.generate_seo_optimization(page),
            self.generate_engagement_plan(page)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{sample_page, ScriptedGenerator};

    #[test]
    fn extract_json_strips_fences() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(raw), "{\"a\": 1}");
    }

    #[test]
    fn extract_json_discards_surrounding_prose() {
        let raw = "Sure! Here it is:\n{\"a\": {\"b\": 2}}\nHope that helps.";
        assert_eq!(extract_json(raw), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn extract_json_returns_text_without_braces() {
        assert_eq!(extract_json("  no json here  "), "no json here");
    }

    #[test]
    fn snippet_counts_characters() {
        assert_eq!(snippet("héllo world", 5), "héllo");
        assert_eq!(snippet("ab", 10), "ab");
    }

    #[test]
    fn prompts_mention_page_fields() {
        let optimizer = ContentOptimizer::new(Arc::new(ScriptedGenerator::new(vec![])));
        let page = sample_page();
        let prompt = optimizer.optimization_prompt(&page);
        assert!(prompt.contains(&page.page_name));
        assert!(prompt.contains(&page.primary_keyword));
        assert!(prompt.contains("\"optimized_title\""));

        let plan_prompt = optimizer.engagement_prompt(&page);
        assert!(plan_prompt.contains("Wednesday"));
        assert!(plan_prompt.contains("\"two_week_posting_schedule\""));
    }

    #[test]
    fn settings_customize_persona_and_blocks() {
        let settings = Settings {
            gemini_persona: Some("Persona for {page_name}.".into()),
            prompt_blocks: vec![PromptBlock {
                id: "b1".into(),
                r#type: "text".into(),
                content: "Target keyword: {primary_keyword}".into(),
            }],
            content_snippet_chars: 10,
            ..Default::default()
        };
        let optimizer =
            ContentOptimizer::new(Arc::new(ScriptedGenerator::new(vec![]))).with_settings(&settings);
        let page = sample_page();

        let prompt = optimizer.optimization_prompt(&page);
        assert!(prompt.starts_with(&format!("Persona for {}.", page.page_name)));
        assert!(prompt.contains(&format!("Target keyword: {}", page.primary_keyword)));

        let plan_prompt = optimizer.engagement_prompt(&page);
        let expected_snippet: String = page.content.chars().take(10).collect();
        assert!(plan_prompt.contains(&format!("- Content Snippet: {}\n", expected_snippet)));
    }

    #[tokio::test]
    async fn parses_fenced_optimization_reply() {
        let reply = "```json\n{\"optimized_title\": \"New title\", \"ctas\": [\"Book a demo\"]}\n```";
        let optimizer = ContentOptimizer::new(Arc::new(ScriptedGenerator::new(vec![reply.into()])));

        let result = optimizer.generate_seo_optimization(&sample_page()).await.unwrap();
        assert_eq!(result.optimized_title, "New title");
        assert_eq!(result.ctas, vec!["Book a demo"]);
        assert!(result.long_tail_keywords.is_empty());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn invalid_reply_falls_back_with_raw_response() {
        let optimizer =
            ContentOptimizer::new(Arc::new(ScriptedGenerator::new(vec!["{not json}".into()])));

        let plan = optimizer.generate_engagement_plan(&sample_page()).await.unwrap();
        assert!(plan.search_topics.is_empty());
        assert_eq!(plan.error.as_deref(), Some("Model did not return valid JSON"));
        assert_eq!(plan.raw_response.as_deref(), Some("{not json}"));
    }

    #[tokio::test]
    async fn requests_use_distinct_system_prompts_and_temperatures() {
        let generator = Arc::new(ScriptedGenerator::new(vec!["{}".into(), "{}".into()]));
        let optimizer = ContentOptimizer::new(generator.clone());
        let page = sample_page();

        optimizer.generate_seo_optimization(&page).await.unwrap();
        optimizer.generate_engagement_plan(&page).await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].system, OPTIMIZER_SYSTEM);
        assert_eq!(requests[0].temperature, OPTIMIZER_TEMPERATURE);
        assert_eq!(requests[1].system, PLANNER_SYSTEM);
        assert_eq!(requests[1].temperature, PLANNER_TEMPERATURE);
    }

    #[tokio::test]
    async fn generator_failures_propagate() {
        let optimizer = ContentOptimizer::new(Arc::new(ScriptedGenerator::failing()));
        assert!(optimizer.generate_seo_optimization(&sample_page()).await.is_err());
    }

    #[tokio::test]
    async fn schedule_entries_default_missing_fields() {
        let reply = r#"{"two_week_posting_schedule": [{"day": "Monday", "time": "11:00 AM"}]}"#;
        let optimizer = ContentOptimizer::new(Arc::new(ScriptedGenerator::new(vec![reply.into()])));

        let plan = optimizer.generate_engagement_plan(&sample_page()).await.unwrap();
        assert_eq!(plan.two_week_posting_schedule.len(), 1);
        assert_eq!(plan.two_week_posting_schedule[0].day, "Monday");
        assert!(plan.two_week_posting_schedule[0].title_idea.is_empty());
    }
}
