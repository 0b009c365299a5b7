//! MenuService: the single coordinator between HTTP handlers and the
//! catalog store.
//!
//! All business logic flows through [`MenuService`]:
//! - catalog pass-through for ingredients and pizzas,
//! - recipe composition (validate references, refuse a second recipe, write
//!   the ordered rows all-or-nothing),
//! - price aggregation (sum of recipe ingredient prices, computed on read).
//!
//! Handlers are thin wrappers that delegate to these methods.

use pizzeria_core::{
    Ingredient, IngredientChanges, Pizza, PizzaChanges, PizzaWithPrice, Recipe, Slug,
};
use pizzeria_storage::{MenuStore, SqliteStore};

use crate::error::ApiError;

/// The central service over a [`MenuStore`] backend.
pub struct MenuService<S: MenuStore> {
    store: S,
}

impl MenuService<SqliteStore> {
    /// Creates a MenuService backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(Self::with_store(store))
    }

    /// Creates a MenuService over a private in-memory SQLite database.
    pub fn in_memory() -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(Self::with_store(store))
    }
}

impl<S: MenuStore> MenuService<S> {
    pub fn with_store(store: S) -> Self {
        MenuService { store }
    }

    // -------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------

    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        Ok(self.store.list_ingredients()?)
    }

    pub fn get_ingredient(&self, slug: &Slug) -> Result<Ingredient, ApiError> {
        Ok(self.store.get_ingredient(slug)?)
    }

    pub fn create_ingredient(&mut self, ingredient: Ingredient) -> Result<Ingredient, ApiError> {
        self.store.insert_ingredient(&ingredient)?;
        tracing::info!(slug = %ingredient.slug, price100 = ingredient.price100, "ingredient created");
        Ok(ingredient)
    }

    pub fn update_ingredient(
        &mut self,
        slug: &Slug,
        changes: IngredientChanges,
    ) -> Result<Ingredient, ApiError> {
        let updated = self.store.update_ingredient(slug, &changes)?;
        tracing::info!(slug = %slug, price100 = updated.price100, "ingredient updated");
        Ok(updated)
    }

    pub fn delete_ingredient(&mut self, slug: &Slug) -> Result<(), ApiError> {
        self.store.delete_ingredient(slug)?;
        tracing::info!(slug = %slug, "ingredient deleted");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Pizzas
    // -------------------------------------------------------------------

    pub fn create_pizza(&mut self, pizza: Pizza) -> Result<Pizza, ApiError> {
        self.store.insert_pizza(&pizza)?;
        tracing::info!(slug = %pizza.slug, "pizza created");
        Ok(pizza)
    }

    pub fn update_pizza(&mut self, slug: &Slug, changes: PizzaChanges) -> Result<Pizza, ApiError> {
        let updated = self.store.update_pizza(slug, &changes)?;
        tracing::info!(slug = %slug, "pizza renamed");
        Ok(updated)
    }

    /// Deletes a pizza together with its recipe.
    pub fn delete_pizza(&mut self, slug: &Slug) -> Result<(), ApiError> {
        self.store.delete_pizza(slug)?;
        tracing::info!(slug = %slug, "pizza deleted");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Recipes
    // -------------------------------------------------------------------

    /// Returns the ingredient slugs of a pizza's recipe in position order.
    ///
    /// A pizza without a recipe and an unknown pizza both yield `NotFound`.
    pub fn get_recipe(&self, pizza: &Slug) -> Result<Recipe, ApiError> {
        let entries = self.store.recipe_entries(pizza)?;
        if entries.is_empty() {
            return Err(ApiError::NotFound(format!("recipe for pizza '{}'", pizza)));
        }
        Ok(Recipe::from_entries(&entries))
    }

    /// Creates the recipe of `pizza` from `ingredients` in the given order.
    ///
    /// Checks run in a fixed order: the pizza exists, then every ingredient
    /// in input order (the first missing one is reported), then no recipe
    /// exists yet. The rows are then written in one transaction; the store's
    /// constraints turn a concurrent duplicate into `Conflict` as well.
    pub fn create_recipe(&mut self, pizza: Slug, ingredients: Vec<Slug>) -> Result<Recipe, ApiError> {
        if !self.store.pizza_exists(&pizza)? {
            tracing::warn!(pizza = %pizza, "recipe rejected: unknown pizza");
            return Err(ApiError::invalid(
                "pizza_slug",
                format!("Provided pizza '{}' does not exist", pizza),
            ));
        }

        if ingredients.is_empty() {
            return Err(ApiError::invalid(
                "ingredients",
                "A recipe needs at least one ingredient",
            ));
        }

        for ingredient in &ingredients {
            if !self.store.ingredient_exists(ingredient)? {
                tracing::warn!(pizza = %pizza, ingredient = %ingredient, "recipe rejected: unknown ingredient");
                return Err(ApiError::invalid(
                    "ingredients",
                    format!("Provided ingredient '{}' does not exist", ingredient),
                ));
            }
        }

        match self.get_recipe(&pizza) {
            Ok(_) => {
                tracing::warn!(pizza = %pizza, "recipe rejected: already exists");
                return Err(ApiError::Conflict(format!(
                    "a recipe already exists for pizza '{}'",
                    pizza
                )));
            }
            Err(ApiError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }

        self.store.insert_recipe(&pizza, &ingredients)?;
        tracing::info!(pizza = %pizza, ingredients = ingredients.len(), "recipe created");
        Ok(Recipe { ingredients })
    }

    // -------------------------------------------------------------------
    // Prices
    // -------------------------------------------------------------------

    /// The pizza with the current sum of its recipe's ingredient prices.
    pub fn get_pizza_price(&self, slug: &Slug) -> Result<PizzaWithPrice, ApiError> {
        if let Some(priced) = self.store.priced_pizza(slug)? {
            return Ok(priced);
        }
        // Both cases are NotFound; the message tells them apart.
        let message = if self.store.pizza_exists(slug)? {
            format!("pizza '{}' has no recipe", slug)
        } else {
            format!("pizza '{}'", slug)
        };
        Err(ApiError::NotFound(message))
    }

    /// Every pizza that has a recipe, with its derived price. Pizzas without
    /// a recipe are left out.
    pub fn list_pizza_prices(&self) -> Result<Vec<PizzaWithPrice>, ApiError> {
        Ok(self.store.priced_pizzas()?)
    }
}
