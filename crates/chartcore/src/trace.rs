use crate::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Ordered record of one traversal: which nodes ran, which edges were
/// taken, and what each node last returned.
///
/// A trace is created fresh at the start of every crawl and handed back
/// with the outcome; it is never stored on the chart or its nodes, so
/// charts stay reusable and standalone node runs stay isolated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlTrace {
    pub crawl_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    visited_nodes: Vec<String>,
    visited_edges: Vec<(String, String)>,
    results: HashMap<String, Value>,
}

impl CrawlTrace {
    pub fn new() -> Self {
        Self {
            crawl_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            visited_nodes: Vec::new(),
            visited_edges: Vec::new(),
            results: HashMap::new(),
        }
    }

    pub fn record_visit(&mut self, node: &str, result: &Value) {
        self.visited_nodes.push(node.to_string());
        self.results.insert(node.to_string(), result.clone());
    }

    pub fn record_edge(&mut self, source: &str, target: &str) {
        self.visited_edges
            .push((source.to_string(), target.to_string()));
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Node names in traversal order; a node revisited through a cycle
    /// appears once per visit.
    pub fn visited_nodes(&self) -> &[String] {
        &self.visited_nodes
    }

    /// `(source, target)` pairs actually taken, in traversal order.
    pub fn visited_edges(&self) -> &[(String, String)] {
        &self.visited_edges
    }

    /// The result produced the last time `node` ran.
    pub fn result_of(&self, node: &str) -> Option<&Value> {
        self.results.get(node)
    }

    pub fn has_visited(&self, node: &str) -> bool {
        self.results.contains_key(node)
    }

    pub fn has_crawled_edge(&self, source: &str, target: &str) -> bool {
        self.visited_edges
            .iter()
            .any(|(s, t)| s == source && t == target)
    }

    /// Number of node invocations so far.
    pub fn steps(&self) -> usize {
        self.visited_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited_nodes.is_empty()
    }
}

impl Default for CrawlTrace {
    fn default() -> Self {
        Self::new()
    }
}
