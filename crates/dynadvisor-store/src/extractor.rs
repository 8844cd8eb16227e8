//! Seam between the catalog and the on-disk record format.

use std::path::Path;

use dynadvisor_core::Result;

use crate::types::{DocRecord, GraphRecord};

/// Turns source files into catalog records.
///
/// The catalog only walks directories; deciding which files are graphs or
/// documentation, and how to read them, belongs to the implementor.
pub trait RecordExtractor: Send + Sync {
    /// Whether `path` should be indexed as a graph.
    fn accepts_graph(&self, path: &Path) -> bool;

    /// Whether `path` should be indexed as documentation.
    fn accepts_doc(&self, path: &Path) -> bool;

    fn extract_graph(&self, path: &Path) -> Result<GraphRecord>;

    fn extract_doc(&self, path: &Path) -> Result<DocRecord>;
}
