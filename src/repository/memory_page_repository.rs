use async_trait::async_trait;

use crate::domain::models::PageRecord;
use crate::error::{AppError, Result};
use crate::repository::PageRepository;

/// Fixed set of pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageRepository {
    pages: Vec<PageRecord>,
}

impl InMemoryPageRepository {
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl PageRepository for InMemoryPageRepository {
    async fn list(&self) -> Result<Vec<PageRecord>> {
        Ok(self.pages.clone())
    }

    async fn get(&self, page_id: &str) -> Result<PageRecord> {
        self.pages
            .iter()
            .find(|p| p.page_id == page_id)
            .cloned()
            .ok_or_else(|| AppError::PageNotFound(page_id.to_string()))
    }

    async fn find_by_name(&self, page_name: &str) -> Result<PageRecord> {
        self.pages
            .iter()
            .find(|p| p.page_name == page_name)
            .cloned()
            .ok_or_else(|| AppError::PageNotFound(page_name.to_string()))
    }
}
