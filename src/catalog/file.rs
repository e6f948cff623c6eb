//! Catalog read from a JSON file holding an array of items.

use super::{CatalogError, CatalogSource};
use crate::domain::Item;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCatalog { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CatalogError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_items_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Arachnid", "type": "Vehicle", "cash_value": "1.1m",
                 "duped_value": "N/A", "children": []}]"#,
        )
        .unwrap();

        let items = FileCatalog::new(&path).fetch_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Arachnid");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let err = FileCatalog::new("/nonexistent/items.json")
            .fetch_items()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.json");
        std::fs::write(&path, "[{").unwrap();
        let err = FileCatalog::new(&path).fetch_items().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
