//! Association between a restaurant and a pizza it sells, carrying the price.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lowest accepted price, inclusive.
pub const MIN_PRICE: i64 = 1;
/// Highest accepted price, inclusive.
pub const MAX_PRICE: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RestaurantPizza {
    pub id: i64,
    pub price: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
}

impl RestaurantPizza {
    /// Check whether a price may be persisted.
    pub fn is_valid_price(price: i64) -> bool {
        (MIN_PRICE..=MAX_PRICE).contains(&price)
    }
}

/// Input for inserting a new association row.
#[derive(Debug, Clone)]
pub struct NewRestaurantPizza {
    pub price: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bounds_are_inclusive() {
        assert!(RestaurantPizza::is_valid_price(MIN_PRICE));
        assert!(RestaurantPizza::is_valid_price(MAX_PRICE));
        assert!(RestaurantPizza::is_valid_price(15));
        assert!(!RestaurantPizza::is_valid_price(0));
        assert!(!RestaurantPizza::is_valid_price(31));
        assert!(!RestaurantPizza::is_valid_price(-5));
    }
}
