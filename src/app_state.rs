//! Implements a struct that holds the state shared by the services.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    reports::ReportService,
    services::{CategoryService, TransactionService},
    stores::{CategoryStore, TransactionStore},
};

/// Bundles the stores for each domain model and hands out the services that
/// operate on them.
///
/// The presentation layer is expected to hold one `AppState` and resolve the
/// acting user's ID itself; every service call takes that ID explicitly.
#[derive(Debug, Clone)]
pub struct AppState<C, T> {
    /// The database connection shared by the stores.
    pub db_connection: Arc<Mutex<Connection>>,

    category_store: C,
    transaction_store: T,
}

impl<C, T> AppState<C, T>
where
    C: CategoryStore + Clone,
    T: TransactionStore + Clone,
{
    /// Create a new [AppState] from stores sharing `db_connection`.
    ///
    /// Most callers will want
    /// [create_app_state](crate::stores::sqlite::create_app_state), which
    /// also initializes the database schema.
    pub fn new(
        db_connection: Arc<Mutex<Connection>>,
        category_store: C,
        transaction_store: T,
    ) -> Self {
        Self {
            db_connection,
            category_store,
            transaction_store,
        }
    }

    /// The store for categories.
    pub fn category_store(&self) -> &C {
        &self.category_store
    }

    /// The store for transactions.
    pub fn transaction_store(&self) -> &T {
        &self.transaction_store
    }

    /// The service for creating, renaming and deleting categories.
    pub fn category_service(&self) -> CategoryService<C> {
        CategoryService::new(self.category_store.clone())
    }

    /// The service for recording and editing transactions.
    pub fn transaction_service(&self) -> TransactionService<C, T> {
        TransactionService::new(self.category_store.clone(), self.transaction_store.clone())
    }

    /// The read-only service computing dashboard and report summaries.
    pub fn report_service(&self) -> ReportService<T> {
        ReportService::new(self.transaction_store.clone())
    }
}
