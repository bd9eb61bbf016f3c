//! Implements a struct that holds the state of the REST server.

use crate::{pagination::PaginationConfig, stores::TransactionStore};

/// The state of the REST server.
///
/// The transaction store is an injected handle rather than a process-wide
/// global so that tests can substitute their own store.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// The URL of the remote dataset that the initialize endpoint loads.
    pub source_url: String,
    /// The store for product sale [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(
        source_url: &str,
        pagination_config: PaginationConfig,
        transaction_store: T,
    ) -> Self {
        Self {
            pagination_config,
            source_url: source_url.to_owned(),
            transaction_store,
        }
    }
}
