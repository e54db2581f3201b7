use crate::dtos::{CreateRestaurantPizzaRequest, RestaurantPizzaCreated};
use crate::models::NewRestaurantPizza;
use crate::services::metrics::{record_error, RESTAURANT_PIZZAS_CREATED};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::{AppError, VALIDATION_ERRORS_MESSAGE};
use validator::Validate;

const REFERENCE_NOT_FOUND_MESSAGE: &str = "Pizza or Restaurant not found";

fn validation_failed() -> AppError {
    record_error("validation_error");
    AppError::InvalidInput(vec![VALIDATION_ERRORS_MESSAGE.to_string()])
}

/// Add a pizza to a restaurant's menu at a price.
///
/// Price is validated before either id is looked up.
///
/// POST /restaurant_pizzas
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected restaurant pizza body");
        validation_failed()
    })?;

    if let Err(errors) = request.validate() {
        record_error("validation_error");
        return Err(errors.into());
    }
    let price = request.price().ok_or_else(validation_failed)?;
    let pizza_id = request.pizza_id();
    let restaurant_id = request.restaurant_id();

    let mut session = state.db.begin_write().await?;

    let pizza = match pizza_id {
        Some(id) => session.find_pizza(id).await?,
        None => None,
    };
    let restaurant = match restaurant_id {
        Some(id) => session.find_restaurant(id).await?,
        None => None,
    };

    let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
        record_error("not_found");
        tracing::debug!(
            pizza_id = ?request.pizza_id,
            restaurant_id = ?request.restaurant_id,
            "Restaurant pizza references unknown record"
        );
        return Err(AppError::UnresolvedReference(vec![
            REFERENCE_NOT_FOUND_MESSAGE.to_string(),
        ]));
    };

    let created = session
        .insert_restaurant_pizza(&NewRestaurantPizza {
            price,
            restaurant_id: restaurant.id,
            pizza_id: pizza.id,
        })
        .await?;
    session.commit().await?;

    RESTAURANT_PIZZAS_CREATED.inc();
    tracing::info!(
        restaurant_pizza_id = created.id,
        restaurant_id = restaurant.id,
        pizza_id = pizza.id,
        price = created.price,
        "Restaurant pizza created"
    );

    Ok((
        StatusCode::CREATED,
        Json(RestaurantPizzaCreated::new(&created, &pizza, &restaurant)),
    ))
}
