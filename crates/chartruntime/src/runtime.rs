use crate::{CrawlConfig, CrawlOutcome, Crawler};
use chartcore::{Chart, ChartError, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registry of named charts executed on demand.
///
/// Charts are read-only during traversal, so one registered chart can be
/// crawled repeatedly; every crawl gets its own fresh trace.
pub struct ChartRuntime {
    crawler: Arc<Crawler>,
    charts: Arc<RwLock<HashMap<String, Chart>>>,
}

impl ChartRuntime {
    pub fn new() -> Self {
        Self::with_config(CrawlConfig::default())
    }

    pub fn with_config(config: CrawlConfig) -> Self {
        Self {
            crawler: Arc::new(Crawler::with_config(config)),
            charts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a chart under its own name, replacing any previous chart
    /// with that name.
    pub async fn register_chart(&self, chart: Chart) {
        tracing::info!(chart = %chart.name(), nodes = chart.len(), "registering chart");
        let mut charts = self.charts.write().await;
        charts.insert(chart.name().to_string(), chart);
    }

    /// Crawl a registered chart. With `start` as `None` the chart's unique
    /// start node is used.
    pub async fn crawl_chart(
        &self,
        name: &str,
        start: Option<&str>,
        input: Value,
    ) -> Result<CrawlOutcome, ChartError> {
        let charts = self.charts.read().await;
        let chart = charts
            .get(name)
            .ok_or_else(|| ChartError::ChartNotFound(name.to_string()))?;

        let outcome = match start {
            Some(start) => self.crawler.crawl(chart, start, input).await,
            None => self.crawler.crawl_from_start(chart, input).await,
        };
        Ok(outcome)
    }

    pub fn crawler(&self) -> &Arc<Crawler> {
        &self.crawler
    }
}

impl Default for ChartRuntime {
    fn default() -> Self {
        Self::new()
    }
}
