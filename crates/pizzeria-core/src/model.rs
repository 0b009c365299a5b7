//! Catalog records exchanged between the store, the service and the HTTP
//! boundary.
//!
//! Prices are integer minor currency units (`price100` = hundredths).

use serde::{Deserialize, Serialize};

use crate::slug::Slug;

/// A priced ingredient. Referenced, never owned, by recipe entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub slug: Slug,
    pub name: String,
    pub price100: i64,
}

/// Mutable fields of an [`Ingredient`]. The slug never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientChanges {
    pub name: String,
    pub price100: i64,
}

impl Ingredient {
    pub fn new(slug: impl Into<Slug>, name: impl Into<String>, price100: i64) -> Self {
        Ingredient {
            slug: slug.into(),
            name: name.into(),
            price100,
        }
    }

    /// Returns this ingredient with `changes` applied.
    pub fn with_changes(self, changes: IngredientChanges) -> Self {
        Ingredient {
            slug: self.slug,
            name: changes.name,
            price100: changes.price100,
        }
    }
}

/// A pizza's master record. Its price lives only in [`PizzaWithPrice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub slug: Slug,
    pub name: String,
}

/// Mutable fields of a [`Pizza`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PizzaChanges {
    pub name: String,
}

impl Pizza {
    pub fn new(slug: impl Into<Slug>, name: impl Into<String>) -> Self {
        Pizza {
            slug: slug.into(),
            name: name.into(),
        }
    }

    /// Attaches a derived price to this pizza.
    pub fn priced(self, price100: i64) -> PizzaWithPrice {
        PizzaWithPrice {
            slug: self.slug,
            name: self.name,
            price100,
        }
    }
}

/// A pizza together with the sum of its recipe's ingredient prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaWithPrice {
    pub slug: Slug,
    pub name: String,
    pub price100: i64,
}

/// The ordered ingredient list of one pizza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: Vec<Slug>,
}

/// One association row binding a pizza to an ingredient.
///
/// The entries of a recipe carry positions `1..=N` without gaps; duplicate
/// ingredients are separate entries with their own positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub pizza: Slug,
    pub ingredient: Slug,
    pub position: u32,
}

impl RecipeEntry {
    /// Builds the rows for `ingredients`, numbering positions from 1 in input
    /// order.
    pub fn sequence(pizza: &Slug, ingredients: &[Slug]) -> Vec<RecipeEntry> {
        ingredients
            .iter()
            .zip(1u32..)
            .map(|(ingredient, position)| RecipeEntry {
                pizza: pizza.clone(),
                ingredient: ingredient.clone(),
                position,
            })
            .collect()
    }
}

impl Recipe {
    /// Collects the ingredient slugs of `entries`, which must already be in
    /// position order.
    pub fn from_entries(entries: &[RecipeEntry]) -> Self {
        Recipe {
            ingredients: entries.iter().map(|e| e.ingredient.clone()).collect(),
        }
    }
}
