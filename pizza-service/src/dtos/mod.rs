pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;

pub use pizzas::PizzaSummary;
pub use restaurant_pizzas::{
    CreateRestaurantPizzaRequest, RestaurantPizzaCreated, RestaurantPizzaDetail,
};
pub use restaurants::{RestaurantDetail, RestaurantSummary};
