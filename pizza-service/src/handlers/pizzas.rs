use crate::dtos::PizzaSummary;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// List every pizza.
///
/// GET /pizzas
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaSummary>>, AppError> {
    let mut session = state.db.begin().await?;
    let pizzas = session.list_pizzas().await?;
    session.commit().await?;

    tracing::debug!(count = pizzas.len(), "Listed pizzas");

    Ok(Json(pizzas.iter().map(PizzaSummary::from).collect()))
}
