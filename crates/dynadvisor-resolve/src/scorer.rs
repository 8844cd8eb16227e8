//! Fixed-weight relevance scoring of one graph against a query.
//!
//! Signals are additive and evaluated in a fixed order; each one that fires
//! contributes a clause to the explanation.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use dynadvisor_store::GraphRecord;

pub const NAME_WORD_WEIGHT: f64 = 10.0;
pub const NAME_SUBSTRING_BONUS: f64 = 20.0;
pub const DESCRIPTION_WORD_WEIGHT: f64 = 5.0;
pub const CATEGORY_WORD_WEIGHT: f64 = 7.0;
pub const NODE_MATCH_WEIGHT: f64 = 3.0;
pub const COMPLEXITY_BONUS: f64 = 5.0;
pub const SIMPLICITY_BONUS: f64 = 5.0;

/// Graphs strictly above this many nodes earn the complexity bonus.
pub const COMPLEX_NODE_THRESHOLD: usize = 10;
/// Graphs at or below this many nodes earn the simplicity bonus.
pub const SIMPLE_NODE_THRESHOLD: usize = 5;

pub const COMPLEXITY_KEYWORDS: &[&str] = &["complex", "advanced", "detailed", "comprehensive"];
pub const SIMPLICITY_KEYWORDS: &[&str] = &["simple", "basic", "easy", "quick", "minimal"];

pub const NO_MATCH_EXPLANATION: &str = "No specific match found.";

// Letters, numbers and underscore only; combining marks and connector
// punctuation other than `_` split words.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+").unwrap());

/// Lower-case `text` and collect its distinct word tokens.
pub fn tokenize(text: &str) -> HashSet<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Score `graph` against `query`. Returns `(score, explanation)`.
pub fn score(graph: &GraphRecord, query: &str) -> (f64, String) {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();

    let query_lower = query.to_lowercase();
    let query_words = tokenize(&query_lower);

    // Name words
    let name_lower = graph.name.to_lowercase();
    let name_overlap = overlap(&query_words, &tokenize(&name_lower));
    if name_overlap > 0 {
        score += name_overlap as f64 * NAME_WORD_WEIGHT;
        reasons.push(format!("name matches '{}'", graph.name));
    }

    // Whole-name containment, in either direction
    if name_lower.contains(&query_lower) || query_lower.contains(&name_lower) {
        score += NAME_SUBSTRING_BONUS;
        reasons.push("name closely matches query".to_string());
    }

    if !graph.description.is_empty() {
        let desc_overlap = overlap(&query_words, &tokenize(&graph.description));
        if desc_overlap > 0 {
            score += desc_overlap as f64 * DESCRIPTION_WORD_WEIGHT;
            reasons.push("description contains relevant keywords".to_string());
        }
    }

    let category_overlap = overlap(&query_words, &tokenize(&graph.category));
    if category_overlap > 0 {
        score += category_overlap as f64 * CATEGORY_WORD_WEIGHT;
        reasons.push(format!("category '{}' matches", graph.category));
    }

    let node_matches = graph
        .nodes
        .iter()
        .filter(|node| {
            let name = node.name.to_lowercase();
            let node_type = node.node_type.to_lowercase();
            query_words
                .iter()
                .any(|w| name.contains(w.as_str()) || node_type.contains(w.as_str()))
        })
        .count();
    if node_matches > 0 {
        score += node_matches as f64 * NODE_MATCH_WEIGHT;
        reasons.push(format!("contains {} relevant node(s)", node_matches));
    }

    if contains_any(&query_lower, COMPLEXITY_KEYWORDS) && graph.node_count > COMPLEX_NODE_THRESHOLD {
        score += COMPLEXITY_BONUS;
        reasons.push(format!("complex graph with {} nodes", graph.node_count));
    }

    if contains_any(&query_lower, SIMPLICITY_KEYWORDS) && graph.node_count <= SIMPLE_NODE_THRESHOLD {
        score += SIMPLICITY_BONUS;
        reasons.push(format!("simple graph with {} nodes", graph.node_count));
    }

    let explanation = if reasons.is_empty() {
        NO_MATCH_EXPLANATION.to_string()
    } else {
        format!("Recommended because {}.", reasons.join(", "))
    };

    (score, explanation)
}

fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|kw| haystack.contains(kw))
}
