//! Application state shared across Axum route handlers and middleware.
//!
//! Handlers receive it through Axum's `State<T>` extractor. Cloning is cheap:
//! the connection is a pool handle and the authenticator sits behind an `Arc`.

use crate::auth::authenticator::Authenticator;
use sea_orm::DatabaseConnection;
use std::{path::PathBuf, sync::Arc};

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    authenticator: Arc<dyn Authenticator>,
    storage_root: PathBuf,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `db` - A SeaORM `DatabaseConnection`, typically cloned from the main pool.
    /// * `authenticator` - Resolves the acting user for each request.
    /// * `storage_root` - Directory attachment files are written under.
    pub fn new(
        db: DatabaseConnection,
        authenticator: Arc<dyn Authenticator>,
        storage_root: PathBuf,
    ) -> Self {
        Self {
            db,
            authenticator,
            storage_root,
        }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn storage_root(&self) -> &PathBuf {
        &self.storage_root
    }
}
