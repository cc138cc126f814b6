use crate::{Chart, CrawlTrace};
use serde::Serialize;

/// Read-only snapshot of a chart for external renderers.
///
/// Carries everything a visualization layer needs (shapes, labels,
/// visited highlighting) without any rendering dependency here. Built
/// from a chart and, optionally, the trace of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub name: String,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub name: String,
    pub label: Option<String>,
    pub shape: String,
    pub visited: bool,
    /// Highlight color when visited, derived from the node kind.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub visited: bool,
}

impl ChartView {
    pub fn new(chart: &Chart, trace: Option<&CrawlTrace>) -> Self {
        let nodes = chart
            .nodes()
            .map(|node| {
                let visited = trace.is_some_and(|t| t.has_visited(node.name()));
                NodeView {
                    name: node.name().to_string(),
                    label: node.label().map(str::to_string),
                    shape: node.kind().shape().to_string(),
                    visited,
                    color: visited.then(|| node.kind().visited_color().to_string()),
                }
            })
            .collect();

        let edges = chart
            .edges()
            .map(|edge| EdgeView {
                source: edge.source().to_string(),
                target: edge.target().to_string(),
                label: edge.label().map(str::to_string),
                visited: trace.is_some_and(|t| t.has_crawled_edge(edge.source(), edge.target())),
            })
            .collect();

        Self {
            name: chart.name().to_string(),
            nodes,
            edges,
        }
    }
}
