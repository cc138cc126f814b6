use crate::{ActionError, Edge, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Unit of work wrapped by a node.
///
/// Implementations must be callable in isolation: `run` may not depend on
/// any chart or crawler state. Whatever side effects it performs are the
/// caller's responsibility to keep safe for repeated invocation.
#[async_trait]
pub trait Action: Send + Sync {
    async fn run(&self, input: Value) -> Result<Value, ActionError>;
}

struct FnAction<F>(F);

#[async_trait]
impl<F> Action for FnAction<F>
where
    F: Fn(Value) -> Result<Value, ActionError> + Send + Sync,
{
    async fn run(&self, input: Value) -> Result<Value, ActionError> {
        (self.0)(input)
    }
}

struct Passthrough;

#[async_trait]
impl Action for Passthrough {
    async fn run(&self, input: Value) -> Result<Value, ActionError> {
        Ok(input)
    }
}

/// Flowchart symbol taxonomy. Purely informational for the engine (a node
/// is terminal when it has no outgoing edges, whatever its kind), but the
/// view layer derives shapes and colors from it and `Chart::find_start`
/// looks for the unique `Start` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Start,
    Process,
    Decision,
    End,
    Success,
    Failure,
    Warning,
}

impl NodeKind {
    /// Graphviz-style shape used by external renderers.
    pub fn shape(&self) -> &'static str {
        match self {
            NodeKind::Start | NodeKind::End => "ellipse",
            NodeKind::Success | NodeKind::Failure | NodeKind::Warning => "ellipse",
            NodeKind::Decision => "diamond",
            NodeKind::Process => "box",
        }
    }

    /// Highlight color for a visited node of this kind.
    pub fn visited_color(&self) -> &'static str {
        match self {
            NodeKind::Success => "green",
            NodeKind::Failure => "red",
            NodeKind::Warning => "yellow",
            _ => "blue",
        }
    }

    /// End-of-run outcome symbols.
    pub fn is_end(&self) -> bool {
        matches!(
            self,
            NodeKind::End | NodeKind::Success | NodeKind::Failure | NodeKind::Warning
        )
    }
}

/// A named unit of work in a chart, owning its outgoing edges.
///
/// Names are case-sensitive, unique within a chart, and immutable once the
/// node is registered.
#[derive(Clone)]
pub struct Node {
    name: String,
    label: Option<String>,
    kind: NodeKind,
    action: Arc<dyn Action>,
    edges: Vec<Edge>,
}

impl Node {
    pub fn new(name: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind: NodeKind::Process,
            action: Arc::new(action),
            edges: Vec::new(),
        }
    }

    /// Node backed by a plain closure over the input value.
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        Self::new(name, FnAction(f))
    }

    /// Node whose action returns its input unchanged. Start and end symbols
    /// are usually passthroughs.
    pub fn passthrough(name: impl Into<String>) -> Self {
        Self::new(name, Passthrough)
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Outgoing edges in registration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// A node with no outgoing edges halts a traversal that reaches it.
    pub fn is_terminal(&self) -> bool {
        self.edges.is_empty()
    }

    /// Invoke the wrapped action directly, bypassing chart and engine.
    ///
    /// This is the standalone-execution contract: no crawl trace is
    /// produced and failures propagate unwrapped.
    pub async fn run(&self, input: Value) -> Result<Value, ActionError> {
        self.action.run(input).await
    }

    // Append-only by design; there is no edge removal.
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("edges", &self.edges)
            .finish()
    }
}
