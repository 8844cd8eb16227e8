//! Data types for indexed graphs and documentation.

use serde::{Deserialize, Serialize};

/// Category assigned to graphs whose source carries none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One node reference inside a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub name: String,
    /// Concrete node type, e.g. `CoreNodeModels.Input.DoubleInput`.
    #[serde(rename = "type")]
    pub node_type: String,
    pub id: String,
}

/// Saved canvas view of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for GraphView {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Flat metadata record for one graph-definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub filepath: String,
    pub filename: String,
    /// Never empty: falls back to the file stem.
    pub name: String,
    pub description: String,
    pub uuid: String,
    pub author: String,
    pub category: String,
    pub nodes: Vec<NodeRef>,
    /// Length of the source node list, which may include entries that
    /// did not yield a [`NodeRef`].
    pub node_count: usize,
    pub connector_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<GraphView>,
}

impl GraphRecord {
    /// Create a record with only the identifying fields set.
    pub fn new(filepath: impl Into<String>, name: impl Into<String>) -> Self {
        let filepath = filepath.into();
        let filename = std::path::Path::new(&filepath)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            filepath,
            filename,
            name: name.into(),
            description: String::new(),
            uuid: String::new(),
            author: String::new(),
            category: UNCATEGORIZED.to_string(),
            nodes: Vec::new(),
            node_count: 0,
            connector_count: 0,
            view: None,
        }
    }

    /// Lower-cased text matched by substring search:
    /// name, description, category, then every node name.
    pub fn searchable_text(&self) -> String {
        let node_names: Vec<&str> = self.nodes.iter().map(|n| n.name.as_str()).collect();
        format!(
            "{} {} {} {}",
            self.name,
            self.description,
            self.category,
            node_names.join(" ")
        )
        .to_lowercase()
    }
}

/// A documentation file loaded next to the graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    pub filepath: String,
    pub filename: String,
    pub content: String,
    /// Character count of `content`.
    pub size: usize,
}
