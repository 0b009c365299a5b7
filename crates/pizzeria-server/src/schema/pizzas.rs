//! Pizza request types.

use serde::Deserialize;

use pizzeria_core::{Pizza, PizzaChanges, Slug};

use super::validation::{FieldError, Validator};

/// Request to create a pizza. Prices are derived, so only slug and name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePizzaRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
}

impl CreatePizzaRequest {
    pub fn validate(self) -> Result<Pizza, Vec<FieldError>> {
        let mut v = Validator::new();
        let slug = v.text("slug", self.slug);
        let name = v.text("name", self.name);
        v.finish(Pizza {
            slug: Slug::new(slug),
            name,
        })
    }
}

/// Request to rename a pizza.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePizzaRequest {
    pub name: Option<String>,
}

impl UpdatePizzaRequest {
    pub fn validate(self) -> Result<PizzaChanges, Vec<FieldError>> {
        let mut v = Validator::new();
        let name = v.text("name", self.name);
        v.finish(PizzaChanges { name })
    }
}
