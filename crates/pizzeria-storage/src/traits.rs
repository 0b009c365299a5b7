//! The [`MenuStore`] trait defining the storage contract for the catalog.
//!
//! The contract has three groups:
//! - **Catalog CRUD** for ingredients and pizzas, plus existence predicates
//!   that propagate every storage error instead of collapsing it to `false`.
//! - **Recipe rows**: an all-or-nothing bulk insert and a position-ordered
//!   read.
//! - **Pricing joins** that sum ingredient prices over recipe rows.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait with
//! identical observable semantics, so they are swappable in the service.

use pizzeria_core::{
    Ingredient, IngredientChanges, Pizza, PizzaChanges, PizzaWithPrice, RecipeEntry, Slug,
};

use crate::error::StorageError;

/// The storage contract for the menu catalog.
///
/// The trait is synchronous; callers serialize access to a store instance.
pub trait MenuStore {
    // -------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------

    /// Lists all ingredients.
    fn list_ingredients(&self) -> Result<Vec<Ingredient>, StorageError>;

    /// Retrieves an ingredient by slug.
    fn get_ingredient(&self, slug: &Slug) -> Result<Ingredient, StorageError>;

    /// Inserts a new ingredient. Fails with `DuplicateSlug` if the slug is taken.
    fn insert_ingredient(&mut self, ingredient: &Ingredient) -> Result<(), StorageError>;

    /// Overwrites the name and price of an existing ingredient.
    fn update_ingredient(
        &mut self,
        slug: &Slug,
        changes: &IngredientChanges,
    ) -> Result<Ingredient, StorageError>;

    /// Deletes an ingredient. Unknown slugs delete nothing and succeed; an
    /// ingredient referenced by a recipe is rejected with `IngredientInUse`.
    fn delete_ingredient(&mut self, slug: &Slug) -> Result<(), StorageError>;

    /// Whether an ingredient with this slug exists.
    fn ingredient_exists(&self, slug: &Slug) -> Result<bool, StorageError>;

    // -------------------------------------------------------------------
    // Pizzas
    // -------------------------------------------------------------------

    /// Lists all pizzas, with or without a recipe.
    fn list_pizzas(&self) -> Result<Vec<Pizza>, StorageError>;

    /// Retrieves a pizza by slug.
    fn get_pizza(&self, slug: &Slug) -> Result<Pizza, StorageError>;

    /// Inserts a new pizza. Fails with `DuplicateSlug` if the slug is taken.
    fn insert_pizza(&mut self, pizza: &Pizza) -> Result<(), StorageError>;

    /// Overwrites the name of an existing pizza.
    fn update_pizza(&mut self, slug: &Slug, changes: &PizzaChanges)
        -> Result<Pizza, StorageError>;

    /// Deletes a pizza and its recipe rows. Unknown slugs delete nothing.
    fn delete_pizza(&mut self, slug: &Slug) -> Result<(), StorageError>;

    /// Whether a pizza with this slug exists.
    fn pizza_exists(&self, slug: &Slug) -> Result<bool, StorageError>;

    // -------------------------------------------------------------------
    // Recipe rows
    // -------------------------------------------------------------------

    /// Returns the recipe rows of `pizza` ordered by position, or an empty
    /// vector when the pizza has no recipe (or does not exist).
    fn recipe_entries(&self, pizza: &Slug) -> Result<Vec<RecipeEntry>, StorageError>;

    /// Writes one row per ingredient with positions `1..=N` in input order.
    ///
    /// Either every row is persisted or none are. Fails with `RecipeExists`
    /// when the pizza already has a recipe and with `UnknownReference` when
    /// the pizza or an ingredient is missing.
    fn insert_recipe(&mut self, pizza: &Slug, ingredients: &[Slug]) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Pricing joins
    // -------------------------------------------------------------------

    /// The pizza with the summed price of its recipe's ingredients, or `None`
    /// when the pizza is missing or has no recipe rows.
    fn priced_pizza(&self, slug: &Slug) -> Result<Option<PizzaWithPrice>, StorageError>;

    /// Every pizza that has at least one recipe row, with its summed price.
    fn priced_pizzas(&self) -> Result<Vec<PizzaWithPrice>, StorageError>;
}
