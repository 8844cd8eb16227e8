//! Recommender: scores every catalog graph and ranks the positive ones.

use std::cmp::Ordering;

use dynadvisor_store::{Catalog, GraphRecord};
use tracing::{info, warn, Dispatch};

use crate::scorer;
use crate::types::Recommendation;

/// Ranks catalog graphs against free-text queries.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    dispatch: Dispatch,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog, dispatch: Dispatch) -> Self {
        Self { catalog, dispatch }
    }

    /// Top `max_results` graphs with a positive score, best first.
    pub fn recommend(&self, query: &str, max_results: usize) -> Vec<Recommendation> {
        tracing::dispatcher::with_default(&self.dispatch, || {
            info!("Processing recommendation request: '{}'", query);

            let snapshot = self.catalog.snapshot();
            if snapshot.graphs.is_empty() {
                warn!("No graphs available in catalog");
                return Vec::new();
            }

            let results = rank(&snapshot.graphs, query, max_results);
            info!("Found {} recommendations", results.len());
            results
        })
    }

    /// Human-readable breakdown of how `graph` scores against `query`.
    pub fn explain(&self, graph: &GraphRecord, query: &str) -> String {
        explain(graph, query)
    }
}

/// Score, filter, stable-sort and truncate. Ties keep the input order.
pub fn rank(graphs: &[GraphRecord], query: &str, max_results: usize) -> Vec<Recommendation> {
    let mut scored: Vec<Recommendation> = graphs
        .iter()
        .filter_map(|graph| {
            let (score, explanation) = scorer::score(graph, query);
            (score > 0.0).then(|| Recommendation {
                graph: graph.clone(),
                score,
                explanation,
            })
        })
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(max_results);
    scored
}

/// Multi-line detail block for display.
pub fn explain(graph: &GraphRecord, query: &str) -> String {
    let (score, explanation) = scorer::score(graph, query);
    let description = if graph.description.is_empty() {
        "N/A"
    } else {
        graph.description.as_str()
    };

    [
        format!("Graph: {}", graph.name),
        format!("Score: {:.1}", score),
        format!("Explanation: {}", explanation),
        String::new(),
        "Graph Details:".to_string(),
        format!("  - Description: {}", description),
        format!("  - Category: {}", graph.category),
        format!("  - Nodes: {}", graph.node_count),
        format!("  - Connectors: {}", graph.connector_count),
        format!("  - Path: {}", graph.filepath),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(name: &str, node_count: usize) -> GraphRecord {
        let mut g = GraphRecord::new(format!("/repo/{}.dyn", name.replace(' ', "_")), name);
        g.node_count = node_count;
        g
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let graphs = vec![
            graph("Door Schedule", 3),
            graph("Wall Analysis", 3),
            graph("Wall Tags", 3),
            graph("Wall", 3),
        ];
        let results = rank(&graphs, "wall analysis", 10);
        let names: Vec<&str> = results.iter().map(|r| r.graph.name.as_str()).collect();
        // Wall Analysis: 2 words + substring = 40; Wall: 1 word + substring = 30; Wall Tags: 10
        assert_eq!(names, vec!["Wall Analysis", "Wall", "Wall Tags"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let graphs = vec![
            graph("Alpha Wall", 3),
            graph("Beta Wall", 3),
            graph("Gamma Wall", 3),
        ];
        let names: Vec<String> = rank(&graphs, "wall", 10)
            .into_iter()
            .map(|r| r.graph.name)
            .collect();
        assert_eq!(names, vec!["Alpha Wall", "Beta Wall", "Gamma Wall"]);
    }

    #[test]
    fn test_rank_truncates() {
        let graphs: Vec<GraphRecord> = (0..8).map(|i| graph(&format!("Wall {}", i), 3)).collect();
        assert_eq!(rank(&graphs, "wall", 3).len(), 3);
        assert!(rank(&graphs, "wall", 0).is_empty());
    }

    #[test]
    fn test_rank_excludes_zero_scores() {
        let graphs = vec![graph("Roof", 20), graph("Stair", 20)];
        assert!(rank(&graphs, "window", 5).is_empty());
        assert!(rank(&[], "window", 5).is_empty());
    }

    #[test]
    fn test_explain_block() {
        let mut g = graph("Test Graph", 0);
        g.category = "Testing".into();
        let text = explain(&g, "test");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Graph: Test Graph");
        assert_eq!(lines[1], "Score: 30.0");
        assert!(lines[2].starts_with("Explanation: Recommended because"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Graph Details:");
        assert_eq!(lines[5], "  - Description: N/A");
        assert_eq!(lines[6], "  - Category: Testing");
        assert_eq!(lines[7], "  - Nodes: 0");
        assert_eq!(lines[8], "  - Connectors: 0");
        assert_eq!(lines[9], "  - Path: /repo/Test_Graph.dyn");
    }
}
