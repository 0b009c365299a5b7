//! In-memory implementation of [`MenuStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. It mirrors the SQLite backend's constraints:
//! unique slugs, one recipe per pizza, cascading pizza deletes and
//! restricted ingredient deletes.

use std::collections::BTreeMap;

use pizzeria_core::{
    Ingredient, IngredientChanges, Pizza, PizzaChanges, PizzaWithPrice, RecipeEntry, Slug,
};

use crate::error::StorageError;
use crate::traits::MenuStore;

/// In-memory implementation of [`MenuStore`].
///
/// Ordered maps keep listings deterministic (sorted by slug), matching the
/// SQLite backend's `ORDER BY slug`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    ingredients: BTreeMap<Slug, Ingredient>,
    pizzas: BTreeMap<Slug, Pizza>,
    /// Recipe rows per pizza, already in position order.
    recipes: BTreeMap<Slug, Vec<RecipeEntry>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums ingredient prices over a recipe. Rows whose ingredient vanished
    /// are skipped, like an inner join. A sum outside `i64` is an error, as
    /// SQLite's `SUM` reports it.
    fn price_of(&self, entries: &[RecipeEntry]) -> Result<i64, StorageError> {
        entries
            .iter()
            .filter_map(|e| self.ingredients.get(&e.ingredient))
            .try_fold(0i64, |total, i| total.checked_add(i.price100))
            .ok_or(StorageError::PriceOverflow)
    }
}

impl MenuStore for InMemoryStore {
    fn list_ingredients(&self) -> Result<Vec<Ingredient>, StorageError> {
        Ok(self.ingredients.values().cloned().collect())
    }

    fn get_ingredient(&self, slug: &Slug) -> Result<Ingredient, StorageError> {
        self.ingredients
            .get(slug)
            .cloned()
            .ok_or_else(|| StorageError::IngredientNotFound(slug.clone()))
    }

    fn insert_ingredient(&mut self, ingredient: &Ingredient) -> Result<(), StorageError> {
        if self.ingredients.contains_key(&ingredient.slug) {
            return Err(StorageError::DuplicateSlug {
                entity: "ingredient",
                slug: ingredient.slug.clone(),
            });
        }
        self.ingredients
            .insert(ingredient.slug.clone(), ingredient.clone());
        Ok(())
    }

    fn update_ingredient(
        &mut self,
        slug: &Slug,
        changes: &IngredientChanges,
    ) -> Result<Ingredient, StorageError> {
        let stored = self
            .ingredients
            .get_mut(slug)
            .ok_or_else(|| StorageError::IngredientNotFound(slug.clone()))?;
        stored.name = changes.name.clone();
        stored.price100 = changes.price100;
        Ok(stored.clone())
    }

    fn delete_ingredient(&mut self, slug: &Slug) -> Result<(), StorageError> {
        let in_use = self
            .recipes
            .values()
            .flatten()
            .any(|entry| &entry.ingredient == slug);
        if in_use {
            return Err(StorageError::IngredientInUse(slug.clone()));
        }
        self.ingredients.remove(slug);
        Ok(())
    }

    fn ingredient_exists(&self, slug: &Slug) -> Result<bool, StorageError> {
        Ok(self.ingredients.contains_key(slug))
    }

    fn list_pizzas(&self) -> Result<Vec<Pizza>, StorageError> {
        Ok(self.pizzas.values().cloned().collect())
    }

    fn get_pizza(&self, slug: &Slug) -> Result<Pizza, StorageError> {
        self.pizzas
            .get(slug)
            .cloned()
            .ok_or_else(|| StorageError::PizzaNotFound(slug.clone()))
    }

    fn insert_pizza(&mut self, pizza: &Pizza) -> Result<(), StorageError> {
        if self.pizzas.contains_key(&pizza.slug) {
            return Err(StorageError::DuplicateSlug {
                entity: "pizza",
                slug: pizza.slug.clone(),
            });
        }
        self.pizzas.insert(pizza.slug.clone(), pizza.clone());
        Ok(())
    }

    fn update_pizza(
        &mut self,
        slug: &Slug,
        changes: &PizzaChanges,
    ) -> Result<Pizza, StorageError> {
        let stored = self
            .pizzas
            .get_mut(slug)
            .ok_or_else(|| StorageError::PizzaNotFound(slug.clone()))?;
        stored.name = changes.name.clone();
        Ok(stored.clone())
    }

    fn delete_pizza(&mut self, slug: &Slug) -> Result<(), StorageError> {
        // The recipe belongs to the pizza and goes with it.
        self.recipes.remove(slug);
        self.pizzas.remove(slug);
        Ok(())
    }

    fn pizza_exists(&self, slug: &Slug) -> Result<bool, StorageError> {
        Ok(self.pizzas.contains_key(slug))
    }

    fn recipe_entries(&self, pizza: &Slug) -> Result<Vec<RecipeEntry>, StorageError> {
        Ok(self.recipes.get(pizza).cloned().unwrap_or_default())
    }

    fn insert_recipe(&mut self, pizza: &Slug, ingredients: &[Slug]) -> Result<(), StorageError> {
        if ingredients.is_empty() {
            return Err(StorageError::EmptyRecipe(pizza.clone()));
        }
        if !self.pizzas.contains_key(pizza) {
            return Err(StorageError::UnknownReference {
                entity: "pizza",
                slug: pizza.clone(),
            });
        }
        if self.recipes.contains_key(pizza) {
            return Err(StorageError::RecipeExists(pizza.clone()));
        }
        if let Some(missing) = ingredients
            .iter()
            .find(|slug| !self.ingredients.contains_key(*slug))
        {
            return Err(StorageError::UnknownReference {
                entity: "ingredient",
                slug: missing.clone(),
            });
        }

        self.recipes
            .insert(pizza.clone(), RecipeEntry::sequence(pizza, ingredients));
        Ok(())
    }

    fn priced_pizza(&self, slug: &Slug) -> Result<Option<PizzaWithPrice>, StorageError> {
        let priced = match (self.pizzas.get(slug), self.recipes.get(slug)) {
            (Some(pizza), Some(entries)) => Some(pizza.clone().priced(self.price_of(entries)?)),
            _ => None,
        };
        Ok(priced)
    }

    fn priced_pizzas(&self) -> Result<Vec<PizzaWithPrice>, StorageError> {
        self.pizzas
            .values()
            .filter_map(|pizza| {
                self.recipes.get(&pizza.slug).map(|entries| {
                    self.price_of(entries)
                        .map(|price100| pizza.clone().priced(price100))
                })
            })
            .collect()
    }
}
