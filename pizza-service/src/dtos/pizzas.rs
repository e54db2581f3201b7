use crate::models::Pizza;
use serde::Serialize;

/// Pizza projected to `id`, `name`, `ingredients`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PizzaSummary {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}

impl From<&Pizza> for PizzaSummary {
    fn from(pizza: &Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name.clone(),
            ingredients: pizza.ingredients.clone(),
        }
    }
}
