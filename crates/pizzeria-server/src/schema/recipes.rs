//! Recipe request types.

use serde::Deserialize;

use pizzeria_core::Slug;

use super::validation::{FieldError, Validator};

/// Request to create the recipe of a pizza.
///
/// `ingredients` order is the recipe order; repeated slugs are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub pizza_slug: Option<String>,
    pub ingredients: Option<Vec<String>>,
}

/// A recipe request with both required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub pizza: Slug,
    pub ingredients: Vec<Slug>,
}

impl CreateRecipeRequest {
    pub fn validate(self) -> Result<NewRecipe, Vec<FieldError>> {
        let mut v = Validator::new();
        let pizza = v.text("pizza_slug", self.pizza_slug);
        let ingredients: Vec<String> = v.present("ingredients", self.ingredients);
        v.finish(NewRecipe {
            pizza: Slug::new(pizza),
            ingredients: ingredients.into_iter().map(Slug::from).collect(),
        })
    }
}
