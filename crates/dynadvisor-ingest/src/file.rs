//! File classification and text reading.

use dynadvisor_core::Result;
use std::path::Path;

/// Kinds of files the catalog cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Dynamo graph definition (`.dyn`, JSON).
    Graph,
    /// Documentation loaded next to the graphs.
    Doc,
    Other,
}

impl FileKind {
    /// Detect file kind from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "dyn" => Self::Graph,
            "md" | "txt" => Self::Doc,
            _ => Self::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Other)
    }
}

/// Read a file as UTF-8 text. Invalid UTF-8 surfaces as an IO error.
pub fn read_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// File name component, or an empty string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
