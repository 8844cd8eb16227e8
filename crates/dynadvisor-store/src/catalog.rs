//! In-memory graph catalog with snapshot swapping.
//!
//! `rebuild` walks the graph and documentation roots, builds a complete
//! new [`CatalogSnapshot`] off-lock and swaps it in. Readers share the
//! current snapshot through an `Arc` and never see a half-built index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn, Dispatch};
use walkdir::WalkDir;

use crate::extractor::RecordExtractor;
use crate::types::{DocRecord, GraphRecord};

/// One consistent view of the catalog contents.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Incremented on every rebuild; 0 before the first one.
    pub version: u64,
    pub graphs: Vec<GraphRecord>,
    pub docs: Vec<DocRecord>,
}

impl CatalogSnapshot {
    /// First graph whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&GraphRecord> {
        let wanted = name.to_lowercase();
        self.graphs.iter().find(|g| g.name.to_lowercase() == wanted)
    }

    /// Graphs whose searchable text contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&GraphRecord> {
        let query_lower = query.to_lowercase();
        self.graphs
            .iter()
            .filter(|g| g.searchable_text().contains(&query_lower))
            .collect()
    }
}

/// Catalog of indexed graphs and documentation.
pub struct Catalog {
    graph_root: PathBuf,
    docs_root: Option<PathBuf>,
    extractor: Box<dyn RecordExtractor>,
    dispatch: Dispatch,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    /// Serializes rebuilds.
    writer: Mutex<()>,
}

impl Catalog {
    /// Create an empty catalog. Nothing is read until [`Catalog::rebuild`].
    pub fn new(
        graph_root: impl AsRef<Path>,
        docs_root: Option<PathBuf>,
        extractor: impl RecordExtractor + 'static,
        dispatch: Dispatch,
    ) -> Self {
        Self {
            graph_root: graph_root.as_ref().to_path_buf(),
            docs_root,
            extractor: Box::new(extractor),
            dispatch,
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            writer: Mutex::new(()),
        }
    }

    pub fn graph_root(&self) -> &Path {
        &self.graph_root
    }

    pub fn docs_root(&self) -> Option<&Path> {
        self.docs_root.as_deref()
    }

    /// Discard the current contents and re-index both roots.
    /// Returns the number of graphs indexed.
    pub fn rebuild(&self) -> usize {
        tracing::dispatcher::with_default(&self.dispatch, || {
            let _writer = self.writer.lock();

            let graphs = self.index_graphs();
            let docs = self.index_docs();
            warn_duplicate_names(&graphs);

            let count = graphs.len();
            let mut current = self.snapshot.write();
            let version = current.version + 1;
            *current = Arc::new(CatalogSnapshot {
                version,
                graphs,
                docs,
            });
            drop(current);

            info!("Catalog built: {} graphs indexed (version {})", count, version);
            count
        })
    }

    /// Current snapshot. Cheap; holds the read lock only while cloning the `Arc`.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.snapshot.read().version
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All graphs, in directory-walk order.
    pub fn get_all(&self) -> Vec<GraphRecord> {
        self.snapshot().graphs.clone()
    }

    /// Case-insensitive exact name lookup; the first match in catalog order wins.
    pub fn get_by_name(&self, name: &str) -> Option<GraphRecord> {
        self.snapshot().find_by_name(name).cloned()
    }

    /// Substring search over name, description, category and node names.
    pub fn search(&self, query: &str) -> Vec<GraphRecord> {
        self.snapshot().search(query).into_iter().cloned().collect()
    }

    /// All documentation records, in directory-walk order.
    pub fn docs(&self) -> Vec<DocRecord> {
        self.snapshot().docs.clone()
    }

    fn index_graphs(&self) -> Vec<GraphRecord> {
        if !self.graph_root.exists() {
            warn!(
                "Graph repository path does not exist: {}",
                self.graph_root.display()
            );
            return Vec::new();
        }

        let files = collect_files(&self.graph_root, |p| self.extractor.accepts_graph(p));
        info!("Found {} .dyn files to index", files.len());

        files
            .iter()
            .filter_map(|path| match self.extractor.extract_graph(path) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }

    fn index_docs(&self) -> Vec<DocRecord> {
        let root = match &self.docs_root {
            Some(root) if root.exists() => root,
            Some(root) => {
                debug!("Documentation path does not exist: {}", root.display());
                return Vec::new();
            }
            None => return Vec::new(),
        };

        let files = collect_files(root, |p| self.extractor.accepts_doc(p));
        info!("Found {} documentation files", files.len());

        files
            .iter()
            .filter_map(|path| match self.extractor.extract_doc(path) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Failed to parse documentation {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }
}

/// Recursively collect accepted files under `root`, sorted by file name
/// within each directory.
fn collect_files(root: &Path, accept: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && accept(path))
        .collect()
}

fn warn_duplicate_names(graphs: &[GraphRecord]) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for graph in graphs {
        match seen.get(&graph.name.to_lowercase()) {
            Some(first) => warn!(
                "Duplicate graph name '{}': {} is shadowed by {}",
                graph.name, graph.filepath, first
            ),
            None => {
                seen.insert(graph.name.to_lowercase(), &graph.filepath);
            }
        }
    }
}
