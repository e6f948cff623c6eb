//! Mock catalog for testing without files or network.

use super::{CatalogError, CatalogSource};
use crate::domain::Item;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    items: Vec<Item>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items.extend(items);
        self
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.clone())
    }
}
