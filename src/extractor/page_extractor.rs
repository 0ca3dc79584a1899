use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::OnceLock;
use url::Url;

use crate::domain::models::{HeadingStructure, PageRecord};
use crate::error::{AppError, Result};
use crate::service::auditor::CTA_PHRASES;

const SKIPPED_TEXT_PARENTS: &[&str] = &["script", "style", "noscript", "template"];

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct PageExtractor;

impl PageExtractor {
    /// Builds a page record from a fetched HTML document.
    pub fn page_from_html(html: &str, url: &str) -> PageRecord {
        let document = Html::parse_document(html);
        let target_keywords = Self::extract_meta_keywords(&document);
        let title = Self::extract_title(&document).unwrap_or_default();
        let h1 = Self::extract_first_heading(&document).unwrap_or_default();

        let page_name = if h1.is_empty() { title.clone() } else { h1.clone() };

        PageRecord {
            page_id: Self::page_id_from_url(url),
            page_name,
            page_type: Self::page_type_from_url(url).to_string(),
            url: url.to_string(),
            primary_keyword: target_keywords.first().cloned().unwrap_or_default(),
            target_keywords,
            title,
            meta_description: Self::extract_meta_description(&document).unwrap_or_default(),
            headings: HeadingStructure {
                h1,
                h2: Self::extract_headings(&document, 2),
                h3: Self::extract_headings(&document, 3),
            },
            content: Self::extract_body_text(&document),
            cta: Self::extract_cta(&document).unwrap_or_default(),
        }
    }

    /// Reads a saved HTML file and extracts it as if it had been fetched from `url`.
    pub async fn load_html_file(path: impl AsRef<Path>, url: &str) -> Result<PageRecord> {
        let path = path.as_ref();
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;
        tracing::debug!("Extracting page from {} ({} bytes)", path.display(), html.len());
        Ok(Self::page_from_html(&html, url))
    }

    pub fn extract_title(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("title").unwrap());
        html.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn extract_meta_description(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector =
            SELECTOR.get_or_init(|| Selector::parse("meta[name='description']").unwrap());
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Comma separated `meta[name=keywords]`, blanks dropped, order kept.
    pub fn extract_meta_keywords(html: &Html) -> Vec<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("meta[name='keywords']").unwrap());
        html.select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|content| {
                content
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn extract_first_heading(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("h1").unwrap());
        html.select(selector)
            .map(element_text)
            .find(|s| !s.is_empty())
    }

    pub fn extract_headings(html: &Html, level: u8) -> Vec<String> {
        static H2: OnceLock<Selector> = OnceLock::new();
        static H3: OnceLock<Selector> = OnceLock::new();
        let selector = match level {
            2 => H2.get_or_init(|| Selector::parse("h2").unwrap()),
            3 => H3.get_or_init(|| Selector::parse("h3").unwrap()),
            _ => return Vec::new(),
        };

        html.select(selector)
            .map(element_text)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Visible body text with whitespace collapsed.
    pub fn extract_body_text(html: &Html) -> String {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("body").unwrap());

        let Some(body) = html.select(selector).next() else {
            return String::new();
        };

        let mut words: Vec<&str> = Vec::new();
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_TEXT_PARENTS.contains(&el.name()))
            });
            if !hidden {
                words.extend(text.split_whitespace());
            }
        }
        words.join(" ")
    }

    /// First link or button whose text contains a known CTA phrase.
    pub fn extract_cta(html: &Html) -> Option<String> {
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        let selector = SELECTOR.get_or_init(|| Selector::parse("a, button").unwrap());

        html.select(selector).map(element_text).find(|text| {
            let lower = text.to_lowercase();
            CTA_PHRASES.iter().any(|phrase| lower.contains(*phrase))
        })
    }

    /// Last path segment as a snake_case id, falling back to the host.
    pub fn page_id_from_url(url: &str) -> String {
        let Ok(parsed) = Url::parse(url) else {
            return "unknown".to_string();
        };

        let slug = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string))
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_default();

        let id: String = slug
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let id = id.trim_matches('_').to_string();

        if id.is_empty() {
            "unknown".to_string()
        } else {
            id
        }
    }

    fn page_type_from_url(url: &str) -> &'static str {
        if url.contains("/blog/") {
            "blog"
        } else {
            "service"
        }
    }
}
