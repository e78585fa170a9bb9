#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use restaurants_rs::models::{RepositoryResult, Restaurant};
use restaurants_rs::repositories::{HttpRestaurantSource, RestaurantSource};
use restaurants_rs::RestaurantService;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DATASET_PATH: &str = "/data/restaurants.json";

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("restaurants_rs=debug")
        .with_test_writer()
        .try_init();
});

pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}

/// A wiremock server standing in for the dataset host, plus a service pointed at it
pub struct TestEnvironment {
    pub server: MockServer,
    pub service: RestaurantService,
}

impl TestEnvironment {
    /// Serve `template` for the dataset path, expecting exactly `expected_fetches` requests
    pub async fn with_response(template: ResponseTemplate, expected_fetches: u64) -> Self {
        Self::with_response_and_timeout(template, expected_fetches, Duration::from_secs(5)).await
    }

    pub async fn with_response_and_timeout(
        template: ResponseTemplate,
        expected_fetches: u64,
        timeout: Duration,
    ) -> Self {
        init_test_tracing();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DATASET_PATH))
            .respond_with(template)
            .expect(expected_fetches)
            .mount(&server)
            .await;

        let source = HttpRestaurantSource::with_timeout(dataset_url(&server), timeout)
            .expect("Failed to build HTTP source");
        let service = RestaurantService::new(Arc::new(source));

        Self { server, service }
    }

    pub async fn serving_dataset(expected_fetches: u64) -> Self {
        Self::with_response(
            ResponseTemplate::new(200).set_body_json(sample_dataset()),
            expected_fetches,
        )
        .await
    }
}

pub fn dataset_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), DATASET_PATH)
}

/// In-memory source returning a fixed dataset
pub struct FixedSource {
    restaurants: Vec<Restaurant>,
}

impl FixedSource {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }
}

#[async_trait]
impl RestaurantSource for FixedSource {
    async fn fetch_restaurants(&self) -> RepositoryResult<Vec<Restaurant>> {
        Ok(self.restaurants.clone())
    }
}

pub fn ids(restaurants: &[Restaurant]) -> Vec<i64> {
    restaurants.iter().map(|r| r.id).collect()
}

/// Excerpt of the restaurants.json document the helper was written against
pub fn sample_dataset() -> Value {
    json!({
        "restaurants": [
            {
                "id": 1,
                "name": "Mission Chinese Food",
                "neighborhood": "Manhattan",
                "photograph": "1.jpg",
                "address": "171 E Broadway, New York, NY 10002",
                "latlng": {"lat": 40.713829, "lng": -73.989667},
                "cuisine_type": "Asian",
                "operating_hours": {
                    "Monday": "5:30 pm - 11:00 pm",
                    "Tuesday": "5:30 pm - 12:00 am",
                    "Sunday": "12:00 pm - 11:00 pm"
                },
                "reviews": [
                    {
                        "name": "Steve",
                        "date": "October 26, 2016",
                        "rating": 4,
                        "comments": "Mission Chinese Food has grown up from its scrappy Orchard Street days into a big, two story restaurant."
                    }
                ]
            },
            {
                "id": 2,
                "name": "Emily",
                "neighborhood": "Brooklyn",
                "photograph": "2.jpg",
                "address": "919 Fulton St, Brooklyn, NY 11238",
                "latlng": {"lat": 40.683555, "lng": -73.966393},
                "cuisine_type": "Pizza"
            },
            {
                "id": 3,
                "name": "Kang Ho Dong Baekjeong",
                "neighborhood": "Manhattan",
                "photograph": "3.jpg",
                "address": "1 E 32nd St, New York, NY 10016",
                "latlng": {"lat": 40.747143, "lng": -73.985414},
                "cuisine_type": "Asian"
            },
            {
                "id": 4,
                "name": "Katz's Delicatessen",
                "neighborhood": "Manhattan",
                "photograph": "4.jpg",
                "address": "205 E Houston St, New York, NY 10002",
                "latlng": {"lat": 40.722216, "lng": -73.987501},
                "cuisine_type": "American"
            },
            {
                "id": 5,
                "name": "Roberta's Pizza",
                "neighborhood": "Brooklyn",
                "photograph": "5.jpg",
                "address": "261 Moore St, Brooklyn, NY 11206",
                "latlng": {"lat": 40.705089, "lng": -73.933585},
                "cuisine_type": "Pizza"
            },
            {
                "id": 6,
                "name": "Hometown BBQ",
                "neighborhood": "Brooklyn",
                "photograph": "6.jpg",
                "address": "454 Van Brunt St, Brooklyn, NY 11231",
                "latlng": {"lat": 40.674925, "lng": -74.016162},
                "cuisine_type": "American"
            },
            {
                "id": 7,
                "name": "Superiority Burger",
                "neighborhood": "Manhattan",
                "photograph": "7.jpg",
                "address": "430 E 9th St, New York, NY 10009",
                "latlng": {"lat": 40.727397, "lng": -73.983645},
                "cuisine_type": "American"
            },
            {
                "id": 8,
                "name": "The Dutch",
                "neighborhood": "Manhattan",
                "photograph": "8.jpg",
                "address": "131 Sullivan St, New York, NY 10012",
                "latlng": {"lat": 40.726584, "lng": -74.002082},
                "cuisine_type": "American"
            },
            {
                "id": 9,
                "name": "Mu Ramen",
                "neighborhood": "Queens",
                "photograph": "9.jpg",
                "address": "1209 Jackson Ave, Queens, NY 11101",
                "latlng": {"lat": 40.743797, "lng": -73.950652},
                "cuisine_type": "Asian"
            },
            {
                "id": 10,
                "name": "Casa Enrique",
                "neighborhood": "Queens",
                "address": "5-48 49th Ave, Queens, NY 11101",
                "latlng": {"lat": 40.743394, "lng": -73.954235},
                "cuisine_type": "Mexican"
            }
        ]
    })
}
