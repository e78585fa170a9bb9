pub mod metrics;
pub mod telemetry;

pub use metrics::{Metrics, MetricsError};
pub use telemetry::{
    get_current_trace_id, init_observability, shutdown_observability, ObservabilityError,
};
