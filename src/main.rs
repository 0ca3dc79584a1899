// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;

use seo_audit::domain::models::PageRecord;
use seo_audit::error::AppError;
use seo_audit::extractor::PageExtractor;
use seo_audit::lifecycle::init_logging;
use seo_audit::repository::{JsonPageRepository, PageRepository};
use seo_audit::service::{
    ContentOptimizer, FrequencyKeywordExtractor, GeminiClient, KeywordStrategist, ReportAssembler,
};
use seo_audit::settings::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON settings file (Gemini credentials, prompt blocks, limits)
    #[arg(global = true, short, long, env = "SEO_AUDIT_SETTINGS")]
    settings: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct PagesArg {
    /// Page dataset: a JSON array of page records
    #[arg(short, long, default_value = "data/pages.json")]
    pages: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the pages in the dataset
    List {
        #[command(flatten)]
        dataset: PagesArg,
    },
    /// Print the score breakdown for one page, or for every page
    Score {
        #[command(flatten)]
        dataset: PagesArg,

        /// Page id or page name
        #[arg(long, conflicts_with = "html")]
        page: Option<String>,

        /// Score a saved HTML document instead of the dataset
        #[arg(long)]
        html: Option<PathBuf>,

        /// Address the HTML document was fetched from
        #[arg(long, requires = "html")]
        url: Option<String>,
    },
    /// Write the full report for one page
    Report {
        #[command(flatten)]
        dataset: PagesArg,

        /// Page id or page name
        #[arg(long)]
        page: String,

        #[arg(short, long, default_value = "reports")]
        output: PathBuf,

        /// Add the AI optimization and engagement plan sections
        #[arg(long, default_value_t = false)]
        with_ai: bool,
    },
}

async fn resolve_page(repo: &JsonPageRepository, key: &str) -> seo_audit::error::Result<PageRecord> {
    match repo.get(key).await {
        Err(AppError::PageNotFound(_)) => repo.find_by_name(key).await,
        other => other,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::load(cli.settings.as_deref())
        .await
        .context("Failed to load settings")?;

    let strategist = KeywordStrategist::new(Arc::new(FrequencyKeywordExtractor), settings.keyword_top_n);

    match cli.command {
        Commands::List { dataset } => {
            let repo = JsonPageRepository::new(dataset.pages);
            for page in repo.list().await? {
                println!("{:<28} {:<10} {}", page.page_id, page.page_type, page.page_name);
            }
        }
        Commands::Score {
            dataset,
            page,
            html,
            url,
        } => {
            let repo = JsonPageRepository::new(dataset.pages);
            let assembler = ReportAssembler::new(strategist);

            let pages = match (html, page) {
                (Some(path), _) => {
                    vec![PageExtractor::load_html_file(&path, url.as_deref().unwrap_or_default()).await?]
                }
                (None, Some(key)) => vec![resolve_page(&repo, &key).await?],
                (None, None) => repo.list().await?,
            };

            let scores: IndexMap<String, _> = pages
                .iter()
                .map(|p| (p.id_or_unknown().to_string(), assembler.score(p).1))
                .collect();
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
        Commands::Report {
            dataset,
            page,
            output,
            with_ai,
        } => {
            let repo = JsonPageRepository::new(dataset.pages);
            let page = resolve_page(&repo, &page).await?;

            let mut assembler = ReportAssembler::new(strategist);
            if with_ai {
                let client = GeminiClient::from_settings(&settings)?;
                let optimizer = ContentOptimizer::new(Arc::new(client)).with_settings(&settings);
                assembler = assembler.with_optimizer(optimizer);
            }

            let report = assembler.assemble(&page).await;
            let path = report.write_to(&output).await?;
            println!(
                "{} scored {}/100, report saved to {}",
                page.page_name,
                report.seo_score.total_score,
                path.display()
            );
        }
    }

    Ok(())
}
