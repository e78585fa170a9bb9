pub mod config;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;

pub use config::{Config, ConfigError, DataSourceConfig, ObservabilityConfig};
pub use observability::{init_observability, shutdown_observability, Metrics};
pub use services::RestaurantService;
