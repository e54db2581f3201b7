//! HTTP handlers for pizza-service.

pub mod health;
pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;

use axum::response::Html;

pub use health::{health_check, metrics_handler, readiness_check};
pub use pizzas::list_pizzas;
pub use restaurant_pizzas::create_restaurant_pizza;
pub use restaurants::{delete_restaurant, get_restaurant, list_restaurants};

/// GET /
pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}
