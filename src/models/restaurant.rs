use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::RestaurantFilters;

/// Geographic position of a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One record of the restaurants dataset.
///
/// Only the fields the queries read are typed. Everything else in the
/// source record (address, opening hours, reviews, ...) is kept in `extra`
/// and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cuisine_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latlng: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// A null category reads the same as a missing one
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level shape of `restaurants.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantDataset {
    pub restaurants: Vec<Restaurant>,
}

impl Restaurant {
    /// Relative link to the restaurant's detail page
    pub fn page_url(&self) -> String {
        format!("./restaurant.html?id={}", self.id)
    }

    /// Path of the restaurant's photograph, `None` when the record has none
    pub fn image_url(&self) -> Option<String> {
        self.photograph
            .as_deref()
            .filter(|photo| !photo.is_empty())
            .map(|photo| format!("/img/{}", photo))
    }

    /// Alt text for the restaurant's photograph
    pub fn image_alt(&self) -> String {
        format!("{} restaurant image", self.name)
    }
}

/// First restaurant with the given id.
pub fn find_by_id(restaurants: &[Restaurant], id: i64) -> Option<&Restaurant> {
    restaurants.iter().find(|restaurant| restaurant.id == id)
}

pub fn filter_by_cuisine(restaurants: Vec<Restaurant>, cuisine: &str) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| restaurant.cuisine_type == cuisine)
        .collect()
}

pub fn filter_by_neighborhood(restaurants: Vec<Restaurant>, neighborhood: &str) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| restaurant.neighborhood == neighborhood)
        .collect()
}

/// Apply both category filters, skipping any dimension set to the sentinel.
pub fn filter_by(restaurants: Vec<Restaurant>, filters: &RestaurantFilters) -> Vec<Restaurant> {
    if filters.is_unfiltered() {
        return restaurants;
    }

    restaurants
        .into_iter()
        .filter(|restaurant| filters.matches(restaurant))
        .collect()
}

/// Distinct cuisines in first-occurrence order
pub fn distinct_cuisines(restaurants: &[Restaurant]) -> Vec<String> {
    distinct_by(restaurants, |restaurant| &restaurant.cuisine_type)
}

/// Distinct neighborhoods in first-occurrence order
pub fn distinct_neighborhoods(restaurants: &[Restaurant]) -> Vec<String> {
    distinct_by(restaurants, |restaurant| &restaurant.neighborhood)
}

fn distinct_by<F>(restaurants: &[Restaurant], field: F) -> Vec<String>
where
    F: Fn(&Restaurant) -> &String,
{
    let mut seen: HashSet<&str> = HashSet::with_capacity(restaurants.len());
    let mut values = Vec::new();

    for restaurant in restaurants {
        let value = field(restaurant);
        if seen.insert(value.as_str()) {
            values.push(value.clone());
        }
    }

    values
}
