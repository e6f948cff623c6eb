pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod persistence;

pub use catalog::{Catalog, CatalogError, CatalogSource, FileCatalog, MockCatalog};
pub use config::Config;
pub use domain::{
    format_value, parse_value, DemandTier, Decimal, IdentityKey, Item, ItemId, ItemInstance,
    RawValue, Side, TrendTier, ValuationBasis,
};
pub use engine::{Comparison, GroupedEntry, SelectionStore, SimilarityQuery, Totals};
pub use error::AppError;
pub use orchestration::{CalculatorSession, SessionError};
pub use persistence::{
    init_db, MemorySlotStorage, PersistenceBridge, Snapshot, SlotStorage, SqliteSlotStorage,
};
