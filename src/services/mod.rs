// Services module - query logic layer

pub mod restaurant_service;

pub use restaurant_service::RestaurantService;
