use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::Restaurant;

/// Filter argument meaning "do not filter on this dimension".
/// Compared exactly, so "All" or "ALL" are ordinary category values.
pub const ALL_SENTINEL: &str = "all";

/// Filter on one category dimension (cuisine or neighborhood)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected == value,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_SENTINEL),
            CategoryFilter::Only(value) => f.write_str(value),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::parse(s))
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::parse(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_SENTINEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_SENTINEL.to_string(),
            CategoryFilter::Only(value) => value,
        }
    }
}

/// Filters for the combined cuisine + neighborhood query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantFilters {
    #[serde(default)]
    pub cuisine: CategoryFilter,
    #[serde(default)]
    pub neighborhood: CategoryFilter,
}

impl RestaurantFilters {
    pub fn new(cuisine: &str, neighborhood: &str) -> Self {
        Self {
            cuisine: CategoryFilter::parse(cuisine),
            neighborhood: CategoryFilter::parse(neighborhood),
        }
    }

    /// True when neither dimension filters anything
    pub fn is_unfiltered(&self) -> bool {
        self.cuisine.is_all() && self.neighborhood.is_all()
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.cuisine.matches(&restaurant.cuisine_type)
            && self.neighborhood.matches(&restaurant.neighborhood)
    }
}
