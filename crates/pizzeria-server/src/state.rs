//! Application state with a shared `MenuService` for concurrent access.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. `MenuService` holds a `rusqlite::Connection`, which is
//! `!Sync`, so handlers take turns on the async mutex. The database
//! transaction and the recipe primary key remain the authority on recipe
//! uniqueness.

use std::sync::Arc;

use pizzeria_storage::SqliteStore;

use crate::error::ApiError;
use crate::service::MenuService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared menu service (async Mutex, non-blocking await).
    pub service: Arc<tokio::sync::Mutex<MenuService<SqliteStore>>>,
}

impl AppState {
    /// Creates a new `AppState` backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let service = MenuService::new(db_path)?;
        Ok(Self::from_service(service))
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        let service = MenuService::in_memory()?;
        Ok(Self::from_service(service))
    }

    fn from_service(service: MenuService<SqliteStore>) -> Self {
        AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
        }
    }
}
