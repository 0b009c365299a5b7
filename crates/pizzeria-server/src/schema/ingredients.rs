//! Ingredient request types.

use serde::Deserialize;

use pizzeria_core::{Ingredient, IngredientChanges, Slug};

use super::validation::{FieldError, Validator};

/// Request to create an ingredient. All fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIngredientRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub price100: Option<i64>,
}

impl CreateIngredientRequest {
    pub fn validate(self) -> Result<Ingredient, Vec<FieldError>> {
        let mut v = Validator::new();
        let slug = v.text("slug", self.slug);
        let name = v.text("name", self.name);
        let price100 = v.present("price100", self.price100);
        v.finish(Ingredient {
            slug: Slug::new(slug),
            name,
            price100,
        })
    }
}

/// Request to overwrite an ingredient's name and price.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    pub price100: Option<i64>,
}

impl UpdateIngredientRequest {
    pub fn validate(self) -> Result<IngredientChanges, Vec<FieldError>> {
        let mut v = Validator::new();
        let name = v.text("name", self.name);
        let price100 = v.present("price100", self.price100);
        v.finish(IngredientChanges { name, price100 })
    }
}
