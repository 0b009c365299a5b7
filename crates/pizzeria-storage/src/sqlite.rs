//! SQLite implementation of [`MenuStore`].
//!
//! [`SqliteStore`] persists the catalog in a SQLite database with WAL mode,
//! foreign keys and automatic schema migrations. Constraint violations
//! reported by SQLite are translated into typed [`StorageError`] variants so
//! the schema, not a sequence of pre-checks, is the final authority on
//! uniqueness and referential integrity.

use std::os::raw::c_int;

use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};

use pizzeria_core::{
    Ingredient, IngredientChanges, Pizza, PizzaChanges, PizzaWithPrice, RecipeEntry, Slug,
};

use crate::error::StorageError;
use crate::traits::MenuStore;

/// SQLite-backed implementation of [`MenuStore`].
///
/// Recipe writes run in an immediate transaction; every statement binds its
/// values as parameters.
pub struct SqliteStore {
    conn: Connection,
}

/// Kind of constraint a failed statement tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Unique,
    ForeignKey,
}

/// Classifies a constraint violation from its extended result code.
fn violated_constraint(err: &rusqlite::Error) -> Option<Constraint> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }
    const UNIQUE: [c_int; 2] = [ffi::SQLITE_CONSTRAINT_PRIMARYKEY, ffi::SQLITE_CONSTRAINT_UNIQUE];
    match failure.extended_code {
        code if UNIQUE.contains(&code) => Some(Constraint::Unique),
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
        _ => None,
    }
}

/// `SUM` over integers fails with this message instead of wrapping.
fn price_error(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(_, Some(message)) if message == "integer overflow" => {
            StorageError::PriceOverflow
        }
        _ => err.into(),
    }
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    fn ingredient_from_row(row: &Row<'_>) -> rusqlite::Result<Ingredient> {
        Ok(Ingredient {
            slug: Slug::new(row.get::<_, String>(0)?),
            name: row.get(1)?,
            price100: row.get(2)?,
        })
    }

    fn pizza_from_row(row: &Row<'_>) -> rusqlite::Result<Pizza> {
        Ok(Pizza {
            slug: Slug::new(row.get::<_, String>(0)?),
            name: row.get(1)?,
        })
    }

    fn priced_from_row(row: &Row<'_>) -> rusqlite::Result<PizzaWithPrice> {
        Ok(PizzaWithPrice {
            slug: Slug::new(row.get::<_, String>(0)?),
            name: row.get(1)?,
            price100: row.get(2)?,
        })
    }

    fn exists(&self, sql: &str, slug: &Slug) -> Result<bool, StorageError> {
        let exists: bool = self
            .conn
            .prepare_cached(sql)?
            .query_row(params![slug.as_str()], |row| row.get(0))?;
        Ok(exists)
    }
}

impl MenuStore for SqliteStore {
    // -------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------

    fn list_ingredients(&self) -> Result<Vec<Ingredient>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT slug, name, price100 FROM ingredient ORDER BY slug")?;
        let rows = stmt.query_map([], Self::ingredient_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn get_ingredient(&self, slug: &Slug) -> Result<Ingredient, StorageError> {
        self.conn
            .prepare_cached("SELECT slug, name, price100 FROM ingredient WHERE slug = ?1")?
            .query_row(params![slug.as_str()], Self::ingredient_from_row)
            .optional()?
            .ok_or_else(|| StorageError::IngredientNotFound(slug.clone()))
    }

    fn insert_ingredient(&mut self, ingredient: &Ingredient) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO ingredient (slug, name, price100) VALUES (?1, ?2, ?3)",
                params![
                    ingredient.slug.as_str(),
                    ingredient.name,
                    ingredient.price100
                ],
            )
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::Unique) => StorageError::DuplicateSlug {
                    entity: "ingredient",
                    slug: ingredient.slug.clone(),
                },
                _ => e.into(),
            })?;
        Ok(())
    }

    fn update_ingredient(
        &mut self,
        slug: &Slug,
        changes: &IngredientChanges,
    ) -> Result<Ingredient, StorageError> {
        let changed = self.conn.execute(
            "UPDATE ingredient SET name = ?1, price100 = ?2 WHERE slug = ?3",
            params![changes.name, changes.price100, slug.as_str()],
        )?;
        if changed == 0 {
            return Err(StorageError::IngredientNotFound(slug.clone()));
        }
        Ok(Ingredient {
            slug: slug.clone(),
            name: changes.name.clone(),
            price100: changes.price100,
        })
    }

    fn delete_ingredient(&mut self, slug: &Slug) -> Result<(), StorageError> {
        self.conn
            .execute(
                "DELETE FROM ingredient WHERE slug = ?1",
                params![slug.as_str()],
            )
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::ForeignKey) => StorageError::IngredientInUse(slug.clone()),
                _ => e.into(),
            })?;
        Ok(())
    }

    fn ingredient_exists(&self, slug: &Slug) -> Result<bool, StorageError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM ingredient WHERE slug = ?1)",
            slug,
        )
    }

    // -------------------------------------------------------------------
    // Pizzas
    // -------------------------------------------------------------------

    fn list_pizzas(&self) -> Result<Vec<Pizza>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT slug, name FROM pizza ORDER BY slug")?;
        let rows = stmt.query_map([], Self::pizza_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn get_pizza(&self, slug: &Slug) -> Result<Pizza, StorageError> {
        self.conn
            .prepare_cached("SELECT slug, name FROM pizza WHERE slug = ?1")?
            .query_row(params![slug.as_str()], Self::pizza_from_row)
            .optional()?
            .ok_or_else(|| StorageError::PizzaNotFound(slug.clone()))
    }

    fn insert_pizza(&mut self, pizza: &Pizza) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO pizza (slug, name) VALUES (?1, ?2)",
                params![pizza.slug.as_str(), pizza.name],
            )
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::Unique) => StorageError::DuplicateSlug {
                    entity: "pizza",
                    slug: pizza.slug.clone(),
                },
                _ => e.into(),
            })?;
        Ok(())
    }

    fn update_pizza(
        &mut self,
        slug: &Slug,
        changes: &PizzaChanges,
    ) -> Result<Pizza, StorageError> {
        let changed = self.conn.execute(
            "UPDATE pizza SET name = ?1 WHERE slug = ?2",
            params![changes.name, slug.as_str()],
        )?;
        if changed == 0 {
            return Err(StorageError::PizzaNotFound(slug.clone()));
        }
        Ok(Pizza {
            slug: slug.clone(),
            name: changes.name.clone(),
        })
    }

    fn delete_pizza(&mut self, slug: &Slug) -> Result<(), StorageError> {
        // recipe and recipe_ingredient rows go with it via ON DELETE CASCADE.
        self.conn.execute(
            "DELETE FROM pizza WHERE slug = ?1",
            params![slug.as_str()],
        )?;
        Ok(())
    }

    fn pizza_exists(&self, slug: &Slug) -> Result<bool, StorageError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM pizza WHERE slug = ?1)", slug)
    }

    // -------------------------------------------------------------------
    // Recipe rows
    // -------------------------------------------------------------------

    fn recipe_entries(&self, pizza: &Slug) -> Result<Vec<RecipeEntry>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT pizza, ingredient, position FROM recipe_ingredient WHERE pizza = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![pizza.as_str()], |row| {
            Ok(RecipeEntry {
                pizza: Slug::new(row.get::<_, String>(0)?),
                ingredient: Slug::new(row.get::<_, String>(1)?),
                position: row.get(2)?,
            })
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn insert_recipe(&mut self, pizza: &Slug, ingredients: &[Slug]) -> Result<(), StorageError> {
        if ingredients.is_empty() {
            return Err(StorageError::EmptyRecipe(pizza.clone()));
        }

        // IMMEDIATE takes the write lock up front so two writers cannot both
        // pass the header insert.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO recipe (pizza) VALUES (?1)",
            params![pizza.as_str()],
        )
        .map_err(|e| match violated_constraint(&e) {
            Some(Constraint::Unique) => StorageError::RecipeExists(pizza.clone()),
            Some(Constraint::ForeignKey) => StorageError::UnknownReference {
                entity: "pizza",
                slug: pizza.clone(),
            },
            None => e.into(),
        })?;

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO recipe_ingredient (pizza, position, ingredient) VALUES (?1, ?2, ?3)",
            )?;
            for entry in RecipeEntry::sequence(pizza, ingredients) {
                stmt.execute(params![
                    entry.pizza.as_str(),
                    entry.position,
                    entry.ingredient.as_str()
                ])
                .map_err(|e| match violated_constraint(&e) {
                    Some(Constraint::ForeignKey) => StorageError::UnknownReference {
                        entity: "ingredient",
                        slug: entry.ingredient.clone(),
                    },
                    _ => StorageError::from(e),
                })?;
            }
        }

        // Dropping `tx` on any error above rolls back every row.
        tx.commit()?;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Pricing joins
    // -------------------------------------------------------------------

    fn priced_pizza(&self, slug: &Slug) -> Result<Option<PizzaWithPrice>, StorageError> {
        let priced = self
            .conn
            .prepare_cached(
                "SELECT p.slug, p.name, SUM(i.price100)
                 FROM pizza p
                 JOIN recipe_ingredient r ON r.pizza = p.slug
                 JOIN ingredient i ON i.slug = r.ingredient
                 WHERE p.slug = ?1
                 GROUP BY p.slug, p.name",
            )?
            .query_row(params![slug.as_str()], Self::priced_from_row)
            .optional()
            .map_err(price_error)?;
        Ok(priced)
    }

    fn priced_pizzas(&self) -> Result<Vec<PizzaWithPrice>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT p.slug, p.name, SUM(i.price100)
             FROM pizza p
             JOIN recipe_ingredient r ON r.pizza = p.slug
             JOIN ingredient i ON i.slug = r.ingredient
             GROUP BY p.slug, p.name
             ORDER BY p.slug",
        )?;
        let rows = stmt
            .query_map([], Self::priced_from_row)
            .map_err(price_error)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(price_error)?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(values: &[&str]) -> Vec<Slug> {
        values.iter().copied().map(Slug::from).collect()
    }

    fn seed(store: &mut SqliteStore) {
        for (slug, name, price) in [
            ("dough", "Dough", 200),
            ("tomato", "Tomato", 150),
            ("mozzarella", "Mozzarella", 300),
        ] {
            store
                .insert_ingredient(&Ingredient::new(slug, name, price))
                .unwrap();
        }
        store
            .insert_pizza(&Pizza::new("margherita", "Margherita"))
            .unwrap();
    }

    fn seeded() -> SqliteStore {
        let mut store = SqliteStore::in_memory().unwrap();
        seed(&mut store);
        store
    }

    #[test]
    fn test_ingredient_crud() {
        let mut store = seeded();
        let slug = Slug::from("tomato");

        assert_eq!(
            store.get_ingredient(&slug).unwrap(),
            Ingredient::new("tomato", "Tomato", 150)
        );

        let updated = store
            .update_ingredient(
                &slug,
                &IngredientChanges {
                    name: "San Marzano".into(),
                    price100: 250,
                },
            )
            .unwrap();
        assert_eq!(store.get_ingredient(&slug).unwrap(), updated);

        let listed: Vec<String> = store
            .list_ingredients()
            .unwrap()
            .into_iter()
            .map(|i| i.slug.to_string())
            .collect();
        assert_eq!(listed, vec!["dough", "mozzarella", "tomato"]);

        store.delete_ingredient(&slug).unwrap();
        assert!(!store.ingredient_exists(&slug).unwrap());
        store.delete_ingredient(&slug).unwrap();
    }

    #[test]
    fn test_missing_rows_are_not_found() {
        let mut store = seeded();
        let slug = Slug::from("ghost");
        assert!(matches!(
            store.get_ingredient(&slug),
            Err(StorageError::IngredientNotFound(_))
        ));
        assert!(matches!(
            store.get_pizza(&slug),
            Err(StorageError::PizzaNotFound(_))
        ));
        assert!(matches!(
            store.update_ingredient(
                &slug,
                &IngredientChanges {
                    name: "x".into(),
                    price100: 1
                }
            ),
            Err(StorageError::IngredientNotFound(_))
        ));
        assert!(matches!(
            store.update_pizza(&slug, &PizzaChanges { name: "x".into() }),
            Err(StorageError::PizzaNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_slug_maps_to_typed_error() {
        let mut store = seeded();
        let err = store
            .insert_ingredient(&Ingredient::new("dough", "Dough again", 1))
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateSlug { entity: "ingredient", .. }));

        let err = store
            .insert_pizza(&Pizza::new("margherita", "Again"))
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateSlug { entity: "pizza", .. }));
    }

    #[test]
    fn test_recipe_positions_and_duplicates() {
        let mut store = seeded();
        let pizza = Slug::from("margherita");
        store
            .insert_recipe(&pizza, &slugs(&["dough", "mozzarella", "tomato", "mozzarella"]))
            .unwrap();

        let entries = store.recipe_entries(&pizza).unwrap();
        let got: Vec<(&str, u32)> = entries
            .iter()
            .map(|e| (e.ingredient.as_str(), e.position))
            .collect();
        assert_eq!(
            got,
            vec![("dough", 1), ("mozzarella", 2), ("tomato", 3), ("mozzarella", 4)]
        );
        assert_eq!(
            store.priced_pizza(&pizza).unwrap().unwrap().price100,
            200 + 300 + 150 + 300
        );
    }

    #[test]
    fn test_recipe_header_enforces_one_recipe_per_pizza() {
        let mut store = seeded();
        let pizza = Slug::from("margherita");
        store.insert_recipe(&pizza, &slugs(&["dough"])).unwrap();

        let err = store
            .insert_recipe(&pizza, &slugs(&["tomato", "mozzarella"]))
            .unwrap_err();
        assert!(matches!(err, StorageError::RecipeExists(_)));

        let entries = store.recipe_entries(&pizza).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ingredient.as_str(), "dough");
    }

    #[test]
    fn test_foreign_key_failure_rolls_back_all_rows() {
        let mut store = seeded();
        let pizza = Slug::from("margherita");

        let err = store
            .insert_recipe(&pizza, &slugs(&["dough", "tomato", "pineapple"]))
            .unwrap_err();
        match err {
            StorageError::UnknownReference { entity, slug } => {
                assert_eq!(entity, "ingredient");
                assert_eq!(slug.as_str(), "pineapple");
            }
            other => panic!("expected UnknownReference, got {other:?}"),
        }
        assert!(store.recipe_entries(&pizza).unwrap().is_empty());

        // The rolled-back header does not block a later, valid recipe.
        store.insert_recipe(&pizza, &slugs(&["dough"])).unwrap();
    }

    #[test]
    fn test_recipe_for_unknown_pizza() {
        let mut store = seeded();
        let err = store
            .insert_recipe(&Slug::from("calzone"), &slugs(&["dough"]))
            .unwrap_err();
        assert!(matches!(err, StorageError::UnknownReference { entity: "pizza", .. }));
    }

    #[test]
    fn test_empty_recipe_rejected() {
        let mut store = seeded();
        let err = store
            .insert_recipe(&Slug::from("margherita"), &[])
            .unwrap_err();
        assert!(matches!(err, StorageError::EmptyRecipe(_)));
    }

    #[test]
    fn test_delete_referenced_ingredient_is_restricted() {
        let mut store = seeded();
        store
            .insert_recipe(&Slug::from("margherita"), &slugs(&["dough"]))
            .unwrap();

        let err = store.delete_ingredient(&Slug::from("dough")).unwrap_err();
        assert!(matches!(err, StorageError::IngredientInUse(_)));
        assert!(store.ingredient_exists(&Slug::from("dough")).unwrap());
    }

    #[test]
    fn test_delete_pizza_cascades_recipe() {
        let mut store = seeded();
        let pizza = Slug::from("margherita");
        store.insert_recipe(&pizza, &slugs(&["dough"])).unwrap();

        store.delete_pizza(&pizza).unwrap();
        assert!(store.recipe_entries(&pizza).unwrap().is_empty());
        store.delete_ingredient(&Slug::from("dough")).unwrap();

        // Recreating the pizza starts without a recipe.
        store
            .insert_pizza(&Pizza::new("margherita", "Margherita"))
            .unwrap();
        store
            .insert_recipe(&pizza, &slugs(&["tomato"]))
            .unwrap();
    }

    #[test]
    fn test_price_is_recomputed_after_ingredient_update() {
        let mut store = seeded();
        store.insert_pizza(&Pizza::new("plain", "Plain")).unwrap();
        let pizza = Slug::from("margherita");
        store
            .insert_recipe(&pizza, &slugs(&["dough", "tomato", "mozzarella"]))
            .unwrap();
        assert_eq!(store.priced_pizza(&pizza).unwrap().unwrap().price100, 650);

        store
            .update_ingredient(
                &Slug::from("tomato"),
                &IngredientChanges {
                    name: "Tomato".into(),
                    price100: 250,
                },
            )
            .unwrap();
        assert_eq!(
            store.priced_pizza(&pizza).unwrap(),
            Some(PizzaWithPrice {
                slug: pizza.clone(),
                name: "Margherita".into(),
                price100: 750,
            })
        );

        let all = store.priced_pizzas().unwrap();
        assert_eq!(all.len(), 1, "pizzas without a recipe are excluded");
        assert_eq!(store.priced_pizza(&Slug::from("plain")).unwrap(), None);
    }

    #[test]
    fn test_price_overflow_is_an_error() {
        let mut store = SqliteStore::in_memory().unwrap();
        store
            .insert_ingredient(&Ingredient::new("gold", "Gold leaf", i64::MAX))
            .unwrap();
        store
            .insert_ingredient(&Ingredient::new("leaf", "Basil leaf", 1))
            .unwrap();
        store.insert_pizza(&Pizza::new("rich", "Rich")).unwrap();
        store
            .insert_recipe(&Slug::from("rich"), &slugs(&["gold", "leaf"]))
            .unwrap();

        assert!(matches!(
            store.priced_pizza(&Slug::from("rich")),
            Err(StorageError::PriceOverflow)
        ));
        assert!(matches!(
            store.priced_pizzas(),
            Err(StorageError::PriceOverflow)
        ));
    }

    #[test]
    fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.db");
        let path = path.to_str().unwrap();

        {
            let mut store = SqliteStore::new(path).unwrap();
            seed(&mut store);
            store
                .insert_recipe(&Slug::from("margherita"), &slugs(&["tomato", "dough"]))
                .unwrap();
        }

        let store = SqliteStore::new(path).unwrap();
        let entries = store.recipe_entries(&Slug::from("margherita")).unwrap();
        let order: Vec<&str> = entries.iter().map(|e| e.ingredient.as_str()).collect();
        assert_eq!(order, vec!["tomato", "dough"]);
        assert_eq!(store.list_pizzas().unwrap().len(), 1);
    }
}
