use crate::dtos::{PizzaSummary, RestaurantSummary};
use crate::models::{Pizza, Restaurant, RestaurantPizza};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// Body of `POST /restaurant_pizzas`.
///
/// Fields are kept as raw JSON so a wrongly typed id resolves to nothing
/// instead of failing deserialization. A missing or out-of-range price is a
/// validation failure; a missing or non-integer id is an unresolved reference.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRestaurantPizzaRequest {
    #[validate(required, custom(function = "validate_price"))]
    pub price: Option<Value>,
    pub pizza_id: Option<Value>,
    pub restaurant_id: Option<Value>,
}

impl CreateRestaurantPizzaRequest {
    /// Price as a whole number, once it has passed validation.
    pub fn price(&self) -> Option<i64> {
        self.price.as_ref().and_then(whole_number)
    }

    pub fn pizza_id(&self) -> Option<i64> {
        self.pizza_id.as_ref().and_then(whole_number)
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.restaurant_id.as_ref().and_then(whole_number)
    }
}

/// Integers, and floats with no fractional part (`15.0`).
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn validate_price(value: &Value) -> Result<(), ValidationError> {
    match whole_number(value) {
        Some(price) if RestaurantPizza::is_valid_price(price) => Ok(()),
        _ => Err(ValidationError::new("price")),
    }
}

/// Association row as nested under a restaurant.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RestaurantPizzaDetail {
    pub id: i64,
    pub pizza_id: i64,
    pub price: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
}

impl RestaurantPizzaDetail {
    pub fn new(restaurant_pizza: &RestaurantPizza, pizza: &Pizza) -> Self {
        Self {
            id: restaurant_pizza.id,
            pizza_id: restaurant_pizza.pizza_id,
            price: restaurant_pizza.price,
            restaurant_id: restaurant_pizza.restaurant_id,
            pizza: PizzaSummary::from(pizza),
        }
    }
}

/// Response of `POST /restaurant_pizzas`: the new row plus both referenced records.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantPizzaCreated {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl RestaurantPizzaCreated {
    pub fn new(restaurant_pizza: &RestaurantPizza, pizza: &Pizza, restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant_pizza.id,
            price: restaurant_pizza.price,
            pizza_id: restaurant_pizza.pizza_id,
            restaurant_id: restaurant_pizza.restaurant_id,
            pizza: PizzaSummary::from(pizza),
            restaurant: RestaurantSummary::from(restaurant),
        }
    }
}
