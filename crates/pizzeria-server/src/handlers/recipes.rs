//! Recipe handlers (get, create).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pizzeria_core::{Recipe, Slug};

use crate::error::ApiError;
use crate::schema::recipes::CreateRecipeRequest;
use crate::state::AppState;

/// Gets the ordered ingredient list of a pizza.
///
/// `GET /recipes/{pizza_slug}`
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(pizza_slug): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.get_recipe(&Slug::new(pizza_slug))?))
}

/// Creates the recipe of a pizza.
///
/// `POST /recipes`
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(req) = payload?;
    let new_recipe = req.validate()?;
    let mut service = state.service.lock().await;
    let recipe = service.create_recipe(new_recipe.pizza, new_recipe.ingredients)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
