use chartcore::{Chart, ChartError};
use petgraph::graph::DiGraph;
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};

/// Names of nodes that no path from `start` can reach.
///
/// Unreachable nodes are legal (the crawler only warns about them), but a
/// nonexistent start is an error. Edge endpoints are already validated at
/// `add_edge` time, so the projection into petgraph cannot dangle.
pub fn unreachable_from<'a>(chart: &'a Chart, start: &str) -> Result<Vec<&'a str>, ChartError> {
    let mut graph = DiGraph::<&str, ()>::new();
    let mut indices = HashMap::new();

    for node in chart.nodes() {
        let idx = graph.add_node(node.name());
        indices.insert(node.name(), idx);
    }
    for edge in chart.edges() {
        graph.add_edge(indices[edge.source()], indices[edge.target()], ());
    }

    let start_idx = *indices
        .get(start)
        .ok_or_else(|| ChartError::UnknownNode(start.to_string()))?;

    let mut seen = HashSet::new();
    let mut dfs = Dfs::new(&graph, start_idx);
    while let Some(idx) = dfs.next(&graph) {
        seen.insert(idx);
    }

    Ok(graph
        .node_indices()
        .filter(|idx| !seen.contains(idx))
        .map(|idx| graph[idx])
        .collect())
}
