//! Domain records for the pizzeria menu catalog.
//!
//! Ingredients and pizzas are identified by a [`Slug`]. A recipe binds one
//! pizza to an ordered list of ingredient slugs; a pizza's price is never
//! stored, it is derived from its recipe at read time.

pub mod model;
pub mod slug;

// Re-export commonly used types
pub use model::{
    Ingredient, IngredientChanges, Pizza, PizzaChanges, PizzaWithPrice, Recipe, RecipeEntry,
};
pub use slug::Slug;
