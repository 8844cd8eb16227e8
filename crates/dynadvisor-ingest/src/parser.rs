//! `.dyn` graph parsing into catalog records.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::file::{self, FileKind};
use dynadvisor_core::{Error, Result};
use dynadvisor_store::{DocRecord, GraphRecord, GraphView, NodeRef, RecordExtractor, UNCATEGORIZED};

/// Extracts [`GraphRecord`]s from Dynamo `.dyn` files and [`DocRecord`]s
/// from Markdown/text documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynExtractor;

impl DynExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl RecordExtractor for DynExtractor {
    fn accepts_graph(&self, path: &Path) -> bool {
        FileKind::from_path(path) == FileKind::Graph
    }

    fn accepts_doc(&self, path: &Path) -> bool {
        FileKind::from_path(path) == FileKind::Doc
    }

    fn extract_graph(&self, path: &Path) -> Result<GraphRecord> {
        let text = file::read_text(path)?;
        let record = parse_graph(path, &text)?;
        debug!("Parsed {}: {} nodes", record.filename, record.node_count);
        Ok(record)
    }

    fn extract_doc(&self, path: &Path) -> Result<DocRecord> {
        let content = file::read_text(path)?;
        Ok(DocRecord {
            filepath: path.to_string_lossy().into_owned(),
            filename: file::file_name(path),
            size: content.chars().count(),
            content,
        })
    }
}

/// Parse the JSON text of a `.dyn` file located at `path`.
pub fn parse_graph(path: &Path, text: &str) -> Result<GraphRecord> {
    let content: Value = serde_json::from_str(text)?;
    let obj = content
        .as_object()
        .ok_or_else(|| Error::Parse("top-level value is not a JSON object".to_string()))?;

    let filename = file::file_name(path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| filename.clone());

    let name = str_field(obj, "Name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(stem);

    let (nodes, node_count) = match obj.get("Nodes").and_then(Value::as_array) {
        Some(raw) => (raw.iter().filter_map(parse_node).collect(), raw.len()),
        None => (Vec::new(), 0),
    };

    let connector_count = obj
        .get("Connectors")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    let view = match obj.get("View") {
        None => None,
        Some(Value::Object(v)) => Some(GraphView {
            x: v.get("X").and_then(Value::as_f64).unwrap_or(0.0),
            y: v.get("Y").and_then(Value::as_f64).unwrap_or(0.0),
            zoom: v.get("Zoom").and_then(Value::as_f64).unwrap_or(1.0),
        }),
        Some(_) => return Err(Error::Parse("View is not a JSON object".to_string())),
    };

    Ok(GraphRecord {
        filepath: path.to_string_lossy().into_owned(),
        filename,
        name,
        description: str_field(obj, "Description").unwrap_or_default(),
        uuid: str_field(obj, "Uuid").unwrap_or_default(),
        author: str_field(obj, "Author").unwrap_or_default(),
        category: str_field(obj, "Category").unwrap_or_else(|| UNCATEGORIZED.to_string()),
        nodes,
        node_count,
        connector_count,
        view,
    })
}

/// Non-object entries yield no node but still count toward `node_count`.
fn parse_node(value: &Value) -> Option<NodeRef> {
    let node = value.as_object()?;
    Some(NodeRef {
        name: str_field(node, "Name").unwrap_or_default(),
        node_type: str_field(node, "ConcreteType").unwrap_or_default(),
        id: str_field(node, "Id").unwrap_or_default(),
    })
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
