//! Domain models for pizza-service.

mod pizza;
mod restaurant;
mod restaurant_pizza;

pub use pizza::Pizza;
pub use restaurant::Restaurant;
pub use restaurant_pizza::{NewRestaurantPizza, RestaurantPizza, MAX_PRICE, MIN_PRICE};
