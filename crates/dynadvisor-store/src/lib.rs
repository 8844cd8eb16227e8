//! dyn-advisor Store: the in-memory catalog of indexed graphs.

pub mod catalog;
pub mod extractor;
pub mod types;

pub use catalog::{Catalog, CatalogSnapshot};
pub use extractor::RecordExtractor;
pub use types::*;
