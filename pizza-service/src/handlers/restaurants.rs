//! Restaurant handlers.

use crate::dtos::{RestaurantDetail, RestaurantPizzaDetail, RestaurantSummary};
use crate::services::metrics::{record_error, RESTAURANTS_DELETED};
use crate::startup::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

fn restaurant_not_found() -> AppError {
    record_error("not_found");
    AppError::NotFound(anyhow::anyhow!("Restaurant not found"))
}

/// Non-integer ids can never name a restaurant.
fn restaurant_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable restaurant id");
            Err(restaurant_not_found())
        }
    }
}

/// List every restaurant without its menu.
///
/// GET /restaurants
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let mut session = state.db.begin().await?;
    let restaurants = session.list_restaurants().await?;
    session.commit().await?;

    tracing::debug!(count = restaurants.len(), "Listed restaurants");

    Ok(Json(restaurants.iter().map(RestaurantSummary::from).collect()))
}

/// Get one restaurant with its pizzas and prices.
///
/// GET /restaurants/:id
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let id = restaurant_id(path)?;
    let mut session = state.db.begin().await?;

    let restaurant = session
        .find_restaurant(id)
        .await?
        .ok_or_else(restaurant_not_found)?;

    let associations = session.list_restaurant_pizzas_for_restaurant(id).await?;
    let mut restaurant_pizzas = Vec::with_capacity(associations.len());
    for association in &associations {
        let pizza = session.find_pizza(association.pizza_id).await?.ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Pizza {} referenced by restaurant pizza {} is missing",
                association.pizza_id,
                association.id
            ))
        })?;
        restaurant_pizzas.push(RestaurantPizzaDetail::new(association, &pizza));
    }

    session.commit().await?;

    Ok(Json(RestaurantDetail::new(&restaurant, restaurant_pizzas)))
}

/// Delete a restaurant and, first, every price row that references it.
///
/// DELETE /restaurants/:id
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = restaurant_id(path)?;
    let mut session = state.db.begin_write().await?;

    if session.find_restaurant(id).await?.is_none() {
        return Err(restaurant_not_found());
    }

    let removed = session.delete_restaurant_pizzas_for_restaurant(id).await?;
    session.delete_restaurant(id).await?;
    session.commit().await?;

    RESTAURANTS_DELETED.inc();
    tracing::info!(
        restaurant_id = id,
        restaurant_pizzas_removed = removed,
        "Restaurant deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
