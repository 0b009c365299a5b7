//! Pizza handlers. Reads return pizzas with their derived price.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pizzeria_core::{Pizza, PizzaWithPrice, Slug};

use crate::error::ApiError;
use crate::schema::pizzas::{CreatePizzaRequest, UpdatePizzaRequest};
use crate::state::AppState;

/// Lists every pizza that has a recipe, with its price.
///
/// `GET /pizzas`
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaWithPrice>>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.list_pizza_prices()?))
}

/// Gets one pizza with its price.
///
/// `GET /pizzas/{slug}`
pub async fn get_pizza(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PizzaWithPrice>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.get_pizza_price(&Slug::new(slug))?))
}

/// Creates a pizza.
///
/// `POST /pizzas`
pub async fn create_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreatePizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pizza>), ApiError> {
    let Json(req) = payload?;
    let pizza = req.validate()?;
    let mut service = state.service.lock().await;
    let created = service.create_pizza(pizza)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Renames a pizza.
///
/// `PUT /pizzas/{slug}`
pub async fn update_pizza(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdatePizzaRequest>, JsonRejection>,
) -> Result<Json<Pizza>, ApiError> {
    let Json(req) = payload?;
    let changes = req.validate()?;
    let mut service = state.service.lock().await;
    Ok(Json(service.update_pizza(&Slug::new(slug), changes)?))
}

/// Deletes a pizza and its recipe.
///
/// `DELETE /pizzas/{slug}`
pub async fn delete_pizza(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut service = state.service.lock().await;
    service.delete_pizza(&Slug::new(slug))?;
    Ok(StatusCode::NO_CONTENT)
}
