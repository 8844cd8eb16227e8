//! dyn-advisor Ingest: turns `.dyn` graph files and documentation into catalog records.

pub mod file;
pub mod parser;

pub use file::FileKind;
pub use parser::{parse_graph, DynExtractor};
