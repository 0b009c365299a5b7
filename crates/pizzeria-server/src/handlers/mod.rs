//! HTTP handler modules for the pizzeria API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`MenuService`](crate::service::MenuService),
//! and return JSON responses. No business logic lives in handlers.

pub mod ingredients;
pub mod pizzas;
pub mod recipes;
