//! Recommendation types.

use serde::Serialize;

use dynadvisor_store::GraphRecord;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub graph: GraphRecord,
    pub score: f64,
    pub explanation: String,
}
