//! Router assembly for the pizzeria HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. TraceLayer provides
/// request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Ingredients
        .route(
            "/ingredients",
            get(handlers::ingredients::list_ingredients)
                .post(handlers::ingredients::create_ingredient),
        )
        .route(
            "/ingredients/{slug}",
            get(handlers::ingredients::get_ingredient)
                .put(handlers::ingredients::update_ingredient)
                .delete(handlers::ingredients::delete_ingredient),
        )
        // Pizzas
        .route(
            "/pizzas",
            get(handlers::pizzas::list_pizzas).post(handlers::pizzas::create_pizza),
        )
        .route(
            "/pizzas/{slug}",
            get(handlers::pizzas::get_pizza)
                .put(handlers::pizzas::update_pizza)
                .delete(handlers::pizzas::delete_pizza),
        )
        // Recipes
        .route("/recipes", post(handlers::recipes::create_recipe))
        .route(
            "/recipes/{pizza_slug}",
            get(handlers::recipes::get_recipe),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
