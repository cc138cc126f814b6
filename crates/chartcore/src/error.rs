use thiserror::Error;

/// Errors raised while assembling a chart. These fail fast: a chart that
/// rejected an `add_node`/`add_edge` call is left exactly as it was before
/// the call.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("duplicate node name: {0}")]
    DuplicateName(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("chart has no start node")]
    NoStart,

    #[error("only one start node is allowed, chart has {0}")]
    MultipleStarts(usize),

    #[error("chart not found: {0}")]
    ChartNotFound(String),
}

/// Failure of a node's action. Actions return this directly; user closures
/// can `?` any error into it through the `anyhow` variant.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("action failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ActionError {
    pub fn msg(message: impl Into<String>) -> Self {
        ActionError::Failed(message.into())
    }
}

/// Errors that terminate a traversal. Carried inside the `Failed` crawl
/// state together with the partial trace.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("no matching transition out of node '{node}'")]
    NoMatchingTransition { node: String },

    #[error("step limit of {limit} reached at node '{node}'")]
    StepLimit { node: String, limit: usize },

    #[error("node '{node}' failed: {source}")]
    Action {
        node: String,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Chart(#[from] ChartError),
}
