//! API schema types for request/response definitions.
//!
//! Response bodies are the catalog records from `pizzeria-core`, serialized
//! as-is. Request bodies live here: their required fields are `Option`s so a
//! missing field becomes a field-level validation error instead of a parse
//! failure.

pub mod ingredients;
pub mod pizzas;
pub mod recipes;
pub mod validation;
