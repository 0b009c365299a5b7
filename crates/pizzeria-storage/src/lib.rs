//! Storage abstraction for the pizzeria menu catalog.
//!
//! Provides the [`MenuStore`] trait defining the storage contract that all
//! backends implement, plus the [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Architecture
//!
//! The store owns two kinds of state:
//! - **Master records** (ingredients and pizzas) with plain CRUD and
//!   existence predicates.
//! - **Recipe rows** binding a pizza to an ordered list of ingredients,
//!   written all-or-nothing and read back in position order.
//!
//! Pizza prices are never stored. The pricing queries join recipe rows to
//! ingredient prices on every call.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: MenuStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::MenuStore;
