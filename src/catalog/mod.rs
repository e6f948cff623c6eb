//! Catalog source abstraction for the read-only item records.

use crate::domain::{Item, ItemId, ItemInstance};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::info;

pub mod file;
pub mod mock;

pub use file::FileCatalog;
pub use mock::MockCatalog;

/// Supplier of catalog items. The engine never mutates what it returns.
#[async_trait]
pub trait CatalogSource: Send + Sync + fmt::Debug {
    /// Fetch every catalog item.
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
}

/// Catalog snapshot indexed by item id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_id: HashMap<ItemId, usize>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if by_id.insert(item.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Catalog { items, by_id })
    }

    /// Fetch and index everything a source has.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let catalog = Self::new(source.fetch_items().await?)?;
        info!(items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.by_id.get(&id).map(|&pos| &self.items[pos])
    }

    /// Instance for `id`, optionally a variant of it.
    pub fn instance(&self, id: ItemId, sub_name: Option<&str>) -> Option<ItemInstance> {
        self.get(id)?.instance(sub_name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
