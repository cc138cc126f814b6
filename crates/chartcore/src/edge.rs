use crate::Value;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an edge is eligible for a node's result.
///
/// Guards are pure: `matches` never mutates chart or engine state. The
/// `Default` guard always matches but is only consulted after every
/// sibling non-default guard has failed, regardless of registration order.
#[derive(Clone)]
pub enum Guard {
    /// Catch-all. An unconditional edge is an edge with this guard.
    Default,
    /// Matches when the result equals the given value.
    Equals(Value),
    /// Arbitrary predicate over the result.
    Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl Guard {
    pub fn matches(&self, result: &Value) -> bool {
        match self {
            Guard::Default => true,
            Guard::Equals(expected) => result == expected,
            Guard::Predicate(pred) => pred(result),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Guard::Default)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Default => write!(f, "Default"),
            Guard::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            Guard::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// A directed, optionally guarded transition between two named nodes.
///
/// Edges reference nodes by name; both ends must already be registered in
/// the owning chart when the edge is added (eager validation).
#[derive(Debug, Clone)]
pub struct Edge {
    source: String,
    target: String,
    guard: Guard,
    label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, guard: Guard) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            guard,
            label: None,
        }
    }

    /// Unconditional edge (default guard).
    pub fn always(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, Guard::Default)
    }

    /// Edge taken when the source result equals `value`.
    pub fn when_equals(
        source: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let value = value.into();
        let label = format!("{:?}", value);
        Self::new(source, target, Guard::Equals(value)).with_label(label)
    }

    /// Edge taken when `pred` holds for the source result.
    pub fn when<F>(source: impl Into<String>, target: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(source, target, Guard::Predicate(Arc::new(pred)))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
