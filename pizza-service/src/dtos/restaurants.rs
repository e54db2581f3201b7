use crate::dtos::RestaurantPizzaDetail;
use crate::models::Restaurant;
use serde::Serialize;

/// Restaurant projected to `id`, `name`, `address`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
}

impl From<&Restaurant> for RestaurantSummary {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
        }
    }
}

/// Full restaurant representation with its menu expanded.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: RestaurantSummary,
    pub restaurant_pizzas: Vec<RestaurantPizzaDetail>,
}

impl RestaurantDetail {
    pub fn new(restaurant: &Restaurant, restaurant_pizzas: Vec<RestaurantPizzaDetail>) -> Self {
        Self {
            restaurant: RestaurantSummary::from(restaurant),
            restaurant_pizzas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pizza, RestaurantPizza};
    use serde_json::json;

    #[test]
    fn summary_exposes_only_listed_fields() {
        let restaurant = Restaurant {
            id: 7,
            name: "Kiki's Pizza".to_string(),
            address: "address3".to_string(),
        };

        let value = serde_json::to_value(RestaurantSummary::from(&restaurant)).unwrap();
        assert_eq!(
            value,
            json!({ "id": 7, "name": "Kiki's Pizza", "address": "address3" })
        );
    }

    #[test]
    fn detail_nests_restaurant_pizzas_with_pizza() {
        let restaurant = Restaurant {
            id: 1,
            name: "Karen's Pizza Shack".to_string(),
            address: "address1".to_string(),
        };
        let pizza = Pizza {
            id: 2,
            name: "Geri".to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese, Pepperoni".to_string(),
        };
        let association = RestaurantPizza {
            id: 9,
            price: 12,
            restaurant_id: 1,
            pizza_id: 2,
        };

        let detail = RestaurantDetail::new(
            &restaurant,
            vec![RestaurantPizzaDetail::new(&association, &pizza)],
        );
        let value = serde_json::to_value(detail).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Karen's Pizza Shack",
                "address": "address1",
                "restaurant_pizzas": [{
                    "id": 9,
                    "pizza_id": 2,
                    "price": 12,
                    "restaurant_id": 1,
                    "pizza": {
                        "id": 2,
                        "name": "Geri",
                        "ingredients": "Dough, Tomato Sauce, Cheese, Pepperoni"
                    }
                }]
            })
        );
    }

    #[test]
    fn detail_without_menu_has_empty_list() {
        let restaurant = Restaurant {
            id: 4,
            name: "Empty".to_string(),
            address: "nowhere".to_string(),
        };

        let value = serde_json::to_value(RestaurantDetail::new(&restaurant, Vec::new())).unwrap();
        assert_eq!(value["restaurant_pizzas"], json!([]));
    }
}
