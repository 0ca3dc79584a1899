use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::models::PageRecord;
use crate::error::{AppError, Result};
use crate::repository::PageRepository;

/// Page dataset stored as a JSON array of page records. The file is re-read
/// on every call so edits show up without a restart.
pub struct JsonPageRepository {
    path: PathBuf,
}

impl JsonPageRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(raw: &str) -> Result<Vec<PageRecord>> {
        Ok(serde_json::from_str(raw)?)
    }

    async fn load(&self) -> Result<Vec<PageRecord>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::io(self.path.display().to_string(), e))?;
        let pages = Self::parse(&raw)?;
        tracing::debug!("Loaded {} pages from {}", pages.len(), self.path.display());
        Ok(pages)
    }
}

#[async_trait]
impl PageRepository for JsonPageRepository {
    async fn list(&self) -> Result<Vec<PageRecord>> {
        self.load().await
    }

    async fn get(&self, page_id: &str) -> Result<PageRecord> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.page_id == page_id)
            .ok_or_else(|| AppError::PageNotFound(page_id.to_string()))
    }

    async fn find_by_name(&self, page_name: &str) -> Result<PageRecord> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.page_name == page_name)
            .ok_or_else(|| AppError::PageNotFound(page_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let pages = JsonPageRepository::parse(
            r#"[{"page_id": "p1", "headings": {"h1": 7, "h2": "not a list"}}]"#,
        )
        .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_id, "p1");
        assert!(pages[0].title.is_empty());
        assert!(pages[0].headings.h1.is_empty());
        assert!(pages[0].headings.h2.is_empty());
        assert!(pages[0].target_keywords.is_empty());
    }

    #[test]
    fn non_array_dataset_is_a_parse_error() {
        let err = JsonPageRepository::parse(r#"{"page_id": "p1"}"#).unwrap_err();
        assert!(matches!(err, AppError::DatasetParse(_)));
    }

    #[test]
    fn lookups_by_id_and_name() {
        let file = dataset_file(
            r#"[{"page_id": "a", "page_name": "Alpha"}, {"page_id": "b", "page_name": "Beta"}]"#,
        );
        let repo = JsonPageRepository::new(file.path());

        tokio_test::block_on(async {
            assert_eq!(repo.list().await.unwrap().len(), 2);
            assert_eq!(repo.get("b").await.unwrap().page_name, "Beta");
            assert_eq!(repo.find_by_name("Alpha").await.unwrap().page_id, "a");

            let err = repo.get("zzz").await.unwrap_err();
            assert!(matches!(err, AppError::PageNotFound(ref id) if id == "zzz"));
        });
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonPageRepository::new(dir.path().join("absent.json"));

        let err = tokio_test::block_on(repo.list()).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
