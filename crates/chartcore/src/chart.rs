use crate::{ChartError, CrawlTrace, Edge, Node, NodeKind};
use std::collections::HashMap;

/// The owning container of nodes and edges.
///
/// Nodes are kept in insertion order for deterministic iteration; a name
/// index backs the lookups. Edges live on their source node in
/// registration order. Both `add_node` and `add_edge` validate eagerly:
/// a duplicate name or a dangling edge endpoint is rejected on the spot
/// and leaves the chart untouched.
#[derive(Debug, Clone)]
pub struct Chart {
    name: String,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Chart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), ChartError> {
        if self.index.contains_key(node.name()) {
            return Err(ChartError::DuplicateName(node.name().to_string()));
        }
        tracing::debug!(chart = %self.name, node = %node.name(), "registering node");
        self.index.insert(node.name().to_string(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Register an edge on its source node. Both endpoints must already be
    /// present in the chart.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), ChartError> {
        if !self.index.contains_key(edge.target()) {
            return Err(ChartError::UnknownNode(edge.target().to_string()));
        }
        let idx = *self
            .index
            .get(edge.source())
            .ok_or_else(|| ChartError::UnknownNode(edge.source().to_string()))?;
        self.nodes[idx].push_edge(edge);
        Ok(())
    }

    pub fn get_node(&self, name: &str) -> Result<&Node, ChartError> {
        self.index
            .get(name)
            .map(|&idx| &self.nodes[idx])
            .ok_or_else(|| ChartError::UnknownNode(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Outgoing edges of a node, in registration order.
    pub fn outgoing(&self, name: &str) -> Result<&[Edge], ChartError> {
        self.get_node(name).map(|node| node.edges())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// All edges, grouped by source node in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.nodes.iter().flat_map(|node| node.edges().iter())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The unique `NodeKind::Start` node of the chart.
    pub fn find_start(&self) -> Result<&Node, ChartError> {
        let mut starts = self.nodes.iter().filter(|n| n.kind() == NodeKind::Start);
        let first = starts.next().ok_or(ChartError::NoStart)?;
        let extra = starts.count();
        if extra > 0 {
            return Err(ChartError::MultipleStarts(extra + 1));
        }
        Ok(first)
    }

    /// End-kind nodes a finished run actually reached, in chart order.
    pub fn visited_outcomes<'a>(&'a self, trace: &CrawlTrace) -> Vec<&'a Node> {
        self.nodes
            .iter()
            .filter(|n| n.kind().is_end() && trace.has_visited(n.name()))
            .collect()
    }
}
