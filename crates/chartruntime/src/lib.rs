//! Execution engine for charts built with `chartcore`
//!
//! The `Crawler` walks a chart from a start node, applying each node's
//! action, selecting the next edge by guard evaluation, and recording the
//! path in a per-run `CrawlTrace`. `ChartRuntime` adds a registry of named
//! charts for callers that execute the same definitions repeatedly.

mod crawler;
mod runtime;
mod validate;

pub use crawler::{run_standalone, CrawlConfig, CrawlOutcome, CrawlState, Crawler};
pub use runtime::ChartRuntime;
pub use validate::unreachable_from;
