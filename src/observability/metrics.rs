use prometheus::{
    CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Failed to register metric: {0}")]
    Registration(#[from] prometheus::Error),
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),
}

/// Prometheus metrics for dataset fetches and restaurant queries
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    // Data source metrics
    pub dataset_fetches_total: CounterVec,
    pub dataset_fetch_duration_seconds: Histogram,

    // Query metrics
    pub restaurant_queries_total: CounterVec,
    pub restaurant_query_results: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance on its own registry
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let dataset_fetches_total = CounterVec::new(
            Opts::new(
                "dataset_fetches_total",
                "Total number of restaurants dataset fetches",
            ),
            &["status"],
        )?;

        let dataset_fetch_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "dataset_fetch_duration_seconds",
                "Restaurants dataset fetch duration in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        let restaurant_queries_total = CounterVec::new(
            Opts::new(
                "restaurant_queries_total",
                "Total number of restaurant queries served",
            ),
            &["operation", "status"],
        )?;

        let restaurant_query_results = HistogramVec::new(
            HistogramOpts::new(
                "restaurant_query_results",
                "Number of values returned by successful restaurant queries",
            )
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 1000.0]),
            &["operation"],
        )?;

        registry.register(Box::new(dataset_fetches_total.clone()))?;
        registry.register(Box::new(dataset_fetch_duration_seconds.clone()))?;
        registry.register(Box::new(restaurant_queries_total.clone()))?;
        registry.register(Box::new(restaurant_query_results.clone()))?;

        info!("Prometheus metrics initialized successfully");

        Ok(Metrics {
            registry,
            dataset_fetches_total,
            dataset_fetch_duration_seconds,
            restaurant_queries_total,
            restaurant_query_results,
        })
    }

    /// Encode all metrics in Prometheus text format
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::Encoding(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))
    }

    /// Record one dataset fetch; `status` is "success" or an error kind label
    pub fn record_dataset_fetch(&self, status: &str, duration: Duration) {
        self.dataset_fetches_total.with_label_values(&[status]).inc();
        self.dataset_fetch_duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Record one query; `result_count` is only observed for successful queries
    pub fn record_query(&self, operation: &str, status: &str, result_count: Option<usize>) {
        self.restaurant_queries_total
            .with_label_values(&[operation, status])
            .inc();

        if let Some(count) = result_count {
            self.restaurant_query_results
                .with_label_values(&[operation])
                .observe(count as f64);
        }
    }
}
