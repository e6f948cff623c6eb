//! Pure computation engine for the trade calculator.
//!
//! Nothing in here performs I/O; persistence and the catalog live behind
//! their own async boundaries.

pub mod aggregator;
pub mod basis;
pub mod drag;
pub mod grouping;
pub mod similarity;
pub mod store;

pub use aggregator::{compute_totals, value_of, Breakdown, BucketTotal, Comparison, Totals};
pub use basis::BasisMap;
pub use drag::{resolve_drop_zone, DragAssignment};
pub use grouping::{count_of, group_items, GroupedEntry};
pub use similarity::{find_similar, preferred_basis, SimilarityQuery, SimilarityResult};
pub use store::SelectionStore;
