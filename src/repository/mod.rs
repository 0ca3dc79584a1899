use async_trait::async_trait;

use crate::domain::models::PageRecord;
use crate::error::Result;

pub mod json_page_repository;
pub mod memory_page_repository;

pub use json_page_repository::JsonPageRepository;
pub use memory_page_repository::InMemoryPageRepository;

/// Source of page records to audit.
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<PageRecord>>;
    async fn get(&self, page_id: &str) -> Result<PageRecord>;
    async fn find_by_name(&self, page_name: &str) -> Result<PageRecord>;
}
