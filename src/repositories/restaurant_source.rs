use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn, Instrument};

use crate::config::DataSourceConfig;
use crate::models::{Restaurant, RestaurantDataset, RepositoryError, RepositoryResult};

/// Trait defining the interface to the remote restaurants dataset
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Fetch the complete dataset, in source order
    async fn fetch_restaurants(&self) -> RepositoryResult<Vec<Restaurant>>;
}

/// HTTP implementation of the RestaurantSource trait.
///
/// Every call issues one GET to the dataset URL; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct HttpRestaurantSource {
    client: Client,
    url: String,
}

impl HttpRestaurantSource {
    /// Create a source around an existing HTTP client
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build a dedicated client from the data-source configuration
    pub fn from_config(config: &DataSourceConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RepositoryError::Transport {
                status: None,
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::new(client, config.data_url.clone()))
    }

    /// Create a client with only a request timeout applied
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Transport {
                status: None,
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::new(client, url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode a `restaurants.json` body
    pub fn parse_dataset(body: &[u8]) -> RepositoryResult<Vec<Restaurant>> {
        let dataset: RestaurantDataset = serde_json::from_slice(body)?;
        Ok(dataset.restaurants)
    }

    fn create_fetch_span(&self) -> tracing::Span {
        tracing::info_span!(
            "HTTP GET",
            "otel.kind" = "client",
            "http.method" = "GET",
            "http.url" = %self.url,
            "http.status_code" = tracing::field::Empty,
            "restaurants.count" = tracing::field::Empty,
        )
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> RepositoryError {
        if error.is_timeout() {
            warn!(url = %self.url, "Dataset request timed out");
            return RepositoryError::Timeout;
        }

        warn!(url = %self.url, error = %error, "Dataset request failed");
        RepositoryError::Transport {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl RestaurantSource for HttpRestaurantSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_restaurants(&self) -> RepositoryResult<Vec<Restaurant>> {
        debug!("Fetching restaurants dataset");

        let fetch_span = self.create_fetch_span();

        async {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| self.map_reqwest_error(e))?;

            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());

            if !status.is_success() {
                warn!(status = status.as_u16(), "Dataset endpoint returned an error status");
                return Err(RepositoryError::Transport {
                    status: Some(status.as_u16()),
                    message: format!("Request failed. Returned status of {}", status.as_u16()),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| self.map_reqwest_error(e))?;

            let restaurants = Self::parse_dataset(&body).map_err(|e| {
                warn!(error = %e, "Dataset body is not a restaurants document");
                e
            })?;

            tracing::Span::current().record("restaurants.count", restaurants.len());
            debug!("Fetched {} restaurants", restaurants.len());

            Ok(restaurants)
        }
        .instrument(fetch_span)
        .await
    }
}
