use crate::validate;
use chartcore::{ActionError, Chart, CrawlError, CrawlTrace, Node, Value};
use std::time::Instant;

/// Traversal configuration.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum number of node invocations per crawl; `None` disables the
    /// check. Cycles are legal, so this is the only thing standing between
    /// a cyclic chart and an endless run.
    pub max_steps: Option<usize>,
    /// Warn about nodes unreachable from the start before traversing.
    pub check_reachability: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(100),
            check_reachability: true,
        }
    }
}

/// Terminal state of a traversal.
#[derive(Debug)]
pub enum CrawlState {
    /// A node with no outgoing edges ran; its result is the final result.
    Halted(Value),
    /// Traversal stopped early; the outcome's trace shows how far it got.
    Failed(CrawlError),
}

/// What a crawl hands back: the terminal state plus the per-run trace.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub state: CrawlState,
    pub trace: CrawlTrace,
}

impl CrawlOutcome {
    pub fn is_halted(&self) -> bool {
        matches!(self.state, CrawlState::Halted(_))
    }

    pub fn final_result(&self) -> Option<&Value> {
        match &self.state {
            CrawlState::Halted(value) => Some(value),
            CrawlState::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CrawlError> {
        match &self.state {
            CrawlState::Halted(_) => None,
            CrawlState::Failed(err) => Some(err),
        }
    }
}

/// Walks a chart from a start node until a terminal node or a failure.
///
/// One node runs to completion before the next edge is selected, so a
/// crawl over deterministic actions always reproduces the same trace. A
/// crawler holds no per-run state and may be reused across sequential
/// crawls of the same or different charts.
pub struct Crawler {
    config: CrawlConfig,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_config(CrawlConfig::default())
    }

    pub fn with_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Execute `chart` from the node named `start` with `input` fed to it.
    ///
    /// Returns the terminal state together with the trace; on failure the
    /// trace covers every node visited before the failing one.
    pub async fn crawl(&self, chart: &Chart, start: &str, input: Value) -> CrawlOutcome {
        let mut trace = CrawlTrace::new();
        let started = Instant::now();

        tracing::info!(
            chart = %chart.name(),
            start = %start,
            crawl_id = %trace.crawl_id,
            "starting crawl"
        );

        if self.config.check_reachability {
            match validate::unreachable_from(chart, start) {
                Ok(unreachable) => {
                    for name in unreachable {
                        tracing::warn!(chart = %chart.name(), node = %name, "node unreachable from start");
                    }
                }
                Err(err) => return self.fail(err.into(), trace, started),
            }
        }

        let mut current = match chart.get_node(start) {
            Ok(node) => node,
            Err(err) => return self.fail(err.into(), trace, started),
        };
        let mut input = input;

        loop {
            if let Some(limit) = self.config.max_steps {
                if trace.steps() >= limit {
                    let err = CrawlError::StepLimit {
                        node: current.name().to_string(),
                        limit,
                    };
                    return self.fail(err, trace, started);
                }
            }

            tracing::debug!(node = %current.name(), step = trace.steps() + 1, "considering node");

            let result = match current.run(input).await {
                Ok(value) => value,
                Err(source) => {
                    let err = CrawlError::Action {
                        node: current.name().to_string(),
                        source,
                    };
                    return self.fail(err, trace, started);
                }
            };
            trace.record_visit(current.name(), &result);

            if current.is_terminal() {
                trace.finish();
                tracing::info!(
                    chart = %chart.name(),
                    crawl_id = %trace.crawl_id,
                    halted_at = %current.name(),
                    steps = trace.steps(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "crawl halted"
                );
                return CrawlOutcome {
                    state: CrawlState::Halted(result),
                    trace,
                };
            }

            let edge = match select_edge(current, &result) {
                Some(edge) => edge,
                None => {
                    let err = CrawlError::NoMatchingTransition {
                        node: current.name().to_string(),
                    };
                    return self.fail(err, trace, started);
                }
            };
            trace.record_edge(edge.source(), edge.target());

            // add_edge validated the target eagerly, but a lookup failure
            // here still surfaces as a failed state rather than a panic.
            current = match chart.get_node(edge.target()) {
                Ok(node) => node,
                Err(err) => return self.fail(err.into(), trace, started),
            };
            input = result;
        }
    }

    /// Execute from the chart's unique start node.
    pub async fn crawl_from_start(&self, chart: &Chart, input: Value) -> CrawlOutcome {
        let start = match chart.find_start() {
            Ok(node) => node.name().to_string(),
            Err(err) => {
                let mut trace = CrawlTrace::new();
                trace.finish();
                return CrawlOutcome {
                    state: CrawlState::Failed(err.into()),
                    trace,
                };
            }
        };
        self.crawl(chart, &start, input).await
    }

    fn fail(&self, err: CrawlError, mut trace: CrawlTrace, started: Instant) -> CrawlOutcome {
        trace.finish();
        tracing::error!(
            crawl_id = %trace.crawl_id,
            steps = trace.steps(),
            duration_ms = started.elapsed().as_millis() as u64,
            error = %err,
            "crawl failed"
        );
        CrawlOutcome {
            state: CrawlState::Failed(err),
            trace,
        }
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-default edge whose guard matches, else the default edge if
/// one exists. Registration order breaks ties among matching guards; the
/// default is a fallback even when registered first.
fn select_edge<'a>(node: &'a Node, result: &Value) -> Option<&'a chartcore::Edge> {
    node.edges()
        .iter()
        .find(|edge| !edge.guard().is_default() && edge.guard().matches(result))
        .or_else(|| node.edges().iter().find(|edge| edge.guard().is_default()))
}

/// Run a single node in isolation for testing or debugging.
///
/// Bypasses the engine entirely: no chart is consulted, no trace is
/// produced, and action failures propagate unwrapped.
pub async fn run_standalone(node: &Node, input: Value) -> Result<Value, ActionError> {
    node.run(input).await
}
