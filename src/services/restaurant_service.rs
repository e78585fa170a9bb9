use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use crate::config::DataSourceConfig;
use crate::models::{
    distinct_cuisines, distinct_neighborhoods, filter_by, filter_by_cuisine,
    filter_by_neighborhood, find_by_id, Restaurant, RestaurantFilters, ServiceError,
    ServiceResult,
};
use crate::observability::Metrics;
use crate::repositories::{HttpRestaurantSource, RestaurantSource};

/// Read-only queries over the restaurants dataset.
///
/// Every operation fetches the dataset afresh and makes one linear pass over
/// it, so an unreachable source fails every call and concurrent calls share
/// no state beyond the source itself.
pub struct RestaurantService {
    source: Arc<dyn RestaurantSource>,
    metrics: Option<Arc<Metrics>>,
}

impl RestaurantService {
    pub fn new(source: Arc<dyn RestaurantSource>) -> Self {
        Self {
            source,
            metrics: None,
        }
    }

    /// Create a service that records fetch and query metrics
    pub fn new_with_metrics(source: Arc<dyn RestaurantSource>, metrics: Arc<Metrics>) -> Self {
        Self {
            source,
            metrics: Some(metrics),
        }
    }

    /// Create a service backed by the HTTP dataset endpoint
    pub fn from_config(config: &DataSourceConfig) -> ServiceResult<Self> {
        let source = HttpRestaurantSource::from_config(config)?;
        Ok(Self::new(Arc::new(source)))
    }

    /// Fetch every restaurant, in source order
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> ServiceResult<Vec<Restaurant>> {
        let result = self.load().await;
        self.observe("fetch_all", &result, Vec::len);
        result
    }

    /// Fetch the first restaurant with the given id
    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: i64) -> ServiceResult<Restaurant> {
        let result = self.load().await.and_then(|restaurants| {
            find_by_id(&restaurants, id)
                .cloned()
                .ok_or(ServiceError::RestaurantNotFound { id })
        });
        self.observe("fetch_by_id", &result, |_| 1);
        result
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_cuisine(&self, cuisine: &str) -> ServiceResult<Vec<Restaurant>> {
        let result = self
            .load()
            .await
            .map(|restaurants| filter_by_cuisine(restaurants, cuisine));
        self.observe("fetch_by_cuisine", &result, Vec::len);
        result
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_neighborhood(
        &self,
        neighborhood: &str,
    ) -> ServiceResult<Vec<Restaurant>> {
        let result = self
            .load()
            .await
            .map(|restaurants| filter_by_neighborhood(restaurants, neighborhood));
        self.observe("fetch_by_neighborhood", &result, Vec::len);
        result
    }

    /// Filter on both dimensions; an argument equal to "all" disables its filter
    pub async fn fetch_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> ServiceResult<Vec<Restaurant>> {
        self.filter(RestaurantFilters::new(cuisine, neighborhood)).await
    }

    /// Typed form of the combined cuisine + neighborhood query
    #[instrument(skip(self), fields(cuisine = %filters.cuisine, neighborhood = %filters.neighborhood))]
    pub async fn filter(&self, filters: RestaurantFilters) -> ServiceResult<Vec<Restaurant>> {
        let result = self
            .load()
            .await
            .map(|restaurants| filter_by(restaurants, &filters));
        self.observe("fetch_by_cuisine_and_neighborhood", &result, Vec::len);
        result
    }

    /// Distinct neighborhoods in first-occurrence order
    #[instrument(skip(self))]
    pub async fn list_neighborhoods(&self) -> ServiceResult<Vec<String>> {
        let result = self
            .load()
            .await
            .map(|restaurants| distinct_neighborhoods(&restaurants));
        self.observe("list_neighborhoods", &result, Vec::len);
        result
    }

    /// Distinct cuisines in first-occurrence order
    #[instrument(skip(self))]
    pub async fn list_cuisines(&self) -> ServiceResult<Vec<String>> {
        let result = self
            .load()
            .await
            .map(|restaurants| distinct_cuisines(&restaurants));
        self.observe("list_cuisines", &result, Vec::len);
        result
    }

    async fn load(&self) -> ServiceResult<Vec<Restaurant>> {
        let started = Instant::now();
        let result = self.source.fetch_restaurants().await;

        if let Some(ref metrics) = self.metrics {
            let status = match &result {
                Ok(_) => "success",
                Err(e) => e.kind().as_str(),
            };
            metrics.record_dataset_fetch(status, started.elapsed());
        }

        result.map_err(ServiceError::from)
    }

    fn observe<T>(
        &self,
        operation: &str,
        result: &ServiceResult<T>,
        size: impl FnOnce(&T) -> usize,
    ) {
        match result {
            Ok(value) => {
                let count = size(value);
                crate::debug_with_trace!(operation, count, "Restaurant query succeeded");
                if let Some(ref metrics) = self.metrics {
                    metrics.record_query(operation, "success", Some(count));
                }
            }
            Err(e) => {
                crate::warn_with_trace!(operation, kind = %e.kind(), error = %e, "Restaurant query failed");
                if let Some(ref metrics) = self.metrics {
                    metrics.record_query(operation, e.kind().as_str(), None);
                }
            }
        }
    }
}
