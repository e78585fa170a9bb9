// Repositories module - data access layer

pub mod restaurant_source;

pub use restaurant_source::{HttpRestaurantSource, RestaurantSource};
