//! Ingredient handlers (list, get, create, update, delete).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pizzeria_core::{Ingredient, Slug};

use crate::error::ApiError;
use crate::schema::ingredients::{CreateIngredientRequest, UpdateIngredientRequest};
use crate::state::AppState;

/// Lists all ingredients.
///
/// `GET /ingredients`
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.list_ingredients()?))
}

/// Gets one ingredient.
///
/// `GET /ingredients/{slug}`
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Ingredient>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.get_ingredient(&Slug::new(slug))?))
}

/// Creates an ingredient.
///
/// `POST /ingredients`
pub async fn create_ingredient(
    State(state): State<AppState>,
    payload: Result<Json<CreateIngredientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let Json(req) = payload?;
    let ingredient = req.validate()?;
    let mut service = state.service.lock().await;
    let created = service.create_ingredient(ingredient)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Overwrites an ingredient's name and price.
///
/// `PUT /ingredients/{slug}`
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdateIngredientRequest>, JsonRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Json(req) = payload?;
    let changes = req.validate()?;
    let mut service = state.service.lock().await;
    Ok(Json(service.update_ingredient(&Slug::new(slug), changes)?))
}

/// Deletes an ingredient.
///
/// `DELETE /ingredients/{slug}`
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut service = state.service.lock().await;
    service.delete_ingredient(&Slug::new(slug))?;
    Ok(StatusCode::NO_CONTENT)
}
