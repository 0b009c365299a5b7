//! HTTP/JSON API server for the pizzeria menu catalog.
//!
//! Exposes ingredient and pizza CRUD, recipe composition and derived pizza
//! prices over REST. This crate contains the service layer, API schema
//! types, error handling, configuration, and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
