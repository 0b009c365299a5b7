//! Storage error types for pizzeria-storage.
//!
//! [`StorageError`] separates the failures callers must react to (missing
//! rows, duplicate keys, broken references) from unexpected database
//! failures, which are carried through unchanged.

use pizzeria_core::Slug;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema migrations could not be applied.
    #[error("migration error: {0}")]
    Migration(String),

    /// An ingredient with the given slug was not found.
    #[error("ingredient not found: {0}")]
    IngredientNotFound(Slug),

    /// A pizza with the given slug was not found.
    #[error("pizza not found: {0}")]
    PizzaNotFound(Slug),

    /// A row with this slug already exists.
    #[error("{entity} already exists: {slug}")]
    DuplicateSlug { entity: &'static str, slug: Slug },

    /// The pizza already has a recipe.
    #[error("a recipe already exists for pizza: {0}")]
    RecipeExists(Slug),

    /// A recipe must contain at least one ingredient.
    #[error("recipe for pizza {0} has no ingredients")]
    EmptyRecipe(Slug),

    /// A recipe row referenced a pizza or ingredient that does not exist.
    #[error("unknown {entity}: {slug}")]
    UnknownReference { entity: &'static str, slug: Slug },

    /// A pizza's summed ingredient prices do not fit in an `i64`.
    #[error("pizza price exceeds the integer range")]
    PriceOverflow,

    /// The ingredient is still used by at least one recipe.
    #[error("ingredient is used by a recipe: {0}")]
    IngredientInUse(Slug),
}
