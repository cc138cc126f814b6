//! Core abstractions for the flowchart engine
//!
//! This crate provides the data model that everything else consumes: the
//! chart (a directed graph of named nodes joined by guarded edges), the
//! per-run crawl trace, and the error types. Execution lives in the
//! `chartruntime` crate.

mod chart;
mod edge;
mod error;
mod node;
mod trace;
mod value;
mod view;

pub use chart::Chart;
pub use edge::{Edge, Guard};
pub use error::{ActionError, ChartError, CrawlError};
pub use node::{Action, Node, NodeKind};
pub use trace::CrawlTrace;
pub use value::Value;
pub use view::{ChartView, EdgeView, NodeView};

/// Result type for chart construction operations
pub type Result<T> = std::result::Result<T, ChartError>;
