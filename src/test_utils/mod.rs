//! Shared test utilities and fixtures
//!
//! Used by unit tests, the integration suites and the benchmarks.

pub mod fixtures {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::models::{HeadingStructure, PageRecord};
    use crate::error::{AppError, Result};
    use crate::service::generation::{GenerationRequest, TextGenerator};

    /// A fully populated service page.
    pub fn sample_page() -> PageRecord {
        PageRecord {
            page_id: "powerbi_services".into(),
            page_name: "Power BI Services".into(),
            page_type: "service".into(),
            url: "https://example.com/services/power-bi".into(),
            primary_keyword: "Power BI services".into(),
            target_keywords: vec![
                "Power BI services".into(),
                "Power BI consulting".into(),
                "dashboard development".into(),
            ],
            title: "Power BI Services for Business Intelligence | Acme".into(),
            meta_description: "Acme delivers Power BI services: dashboard development, data \
                               modeling and reporting that help teams make faster decisions."
                .into(),
            headings: HeadingStructure {
                h1: "Power BI Services".into(),
                h2: vec![
                    "Interactive Dashboards".into(),
                    "Data Modeling and DAX".into(),
                ],
                h3: vec!["Automated KPI Tracking".into()],
            },
            content: "We provide Power BI services for teams that want clear reports. \
                      Our Power BI consulting covers data modeling, DAX measures and \
                      dashboard development. You can see our work at /services/power-bi \
                      and read case studies on /blog/powerbi-wins. Contact us today to \
                      book a demo with our team."
                .into(),
            cta: "Book a free consultation".into(),
        }
    }

    /// A page with every field empty apart from its id.
    pub fn empty_page() -> PageRecord {
        PageRecord {
            page_id: "empty_page".into(),
            ..Default::default()
        }
    }

    /// A blog page with no CTA and a weak title.
    pub fn blog_page() -> PageRecord {
        PageRecord {
            page_id: "blog_ai_trends".into(),
            page_name: "AI Trends".into(),
            page_type: "blog".into(),
            url: "https://example.com/blog/ai-trends".into(),
            primary_keyword: "AI integration".into(),
            target_keywords: vec!["AI integration".into(), "machine learning".into()],
            title: "Trends".into(),
            meta_description: String::new(),
            headings: HeadingStructure {
                h1: String::new(),
                h2: vec!["What changed".into()],
                h3: Vec::new(),
            },
            content: "Machine learning keeps changing. Models get larger every year. \
                      Teams adopt AI integration slowly because data pipelines lag behind."
                .into(),
            cta: String::new(),
        }
    }

    pub fn sample_pages() -> Vec<PageRecord> {
        vec![sample_page(), blog_page(), empty_page()]
    }

    /// Text generator with canned replies.
    ///
    /// Keyed replies are chosen by a substring of the prompt; otherwise
    /// queued replies are served in call order.
    pub struct ScriptedGenerator {
        keyed: Vec<(String, String)>,
        queue: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<GenerationRequest>>,
        fail: bool,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<String>) -> Self {
            Self {
                keyed: Vec::new(),
                queue: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn keyed(rules: Vec<(&str, &str)>) -> Self {
            Self {
                keyed: rules
                    .into_iter()
                    .map(|(needle, reply)| (needle.to_string(), reply.to_string()))
                    .collect(),
                ..Self::new(Vec::new())
            }
        }

        /// Every call fails with a service error.
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        /// Requests received so far.
        pub fn requests(&self) -> Vec<GenerationRequest> {
            self.requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(request.clone());

            if self.fail {
                return Err(AppError::service("scripted", "generator unavailable"));
            }

            if let Some((_, reply)) = self.keyed.iter().find(|(needle, _)| request.prompt.contains(needle)) {
                return Ok(reply.clone());
            }

            self.queue
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .pop_front()
                .ok_or_else(|| AppError::service("scripted", "no scripted reply left"))
        }

        fn name(&self) -> &'static str {
            "Scripted"
        }
    }
}
