//! Loading the transaction datastore from the remote dataset.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, models::Transaction, stores::TransactionStore};

/// The dataset the store is initialized from when no other URL is configured.
pub const DEFAULT_SOURCE_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Fetch the transaction dataset from `url`.
///
/// # Errors
/// Returns an [Error::DatasetFetch] if the request fails, the server responds
/// with an error status, or the body is not a JSON array of transactions.
pub async fn fetch_transactions(url: &str) -> Result<Vec<Transaction>, Error> {
    let transactions = reqwest::get(url)
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(transactions)
}

/// A route handler that replaces the entire datastore with a fresh copy of
/// the remote dataset.
///
/// The store performs the replace as one transaction, so a failed reload
/// leaves the previous records in place.
pub async fn initialize_database<T>(State(state): State<AppState<T>>) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    let transactions = match fetch_transactions(&state.source_url).await {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };

    tracing::info!(
        "replacing the datastore with {} transactions from {}",
        transactions.len(),
        state.source_url
    );

    let mut store = state.transaction_store.clone();
    match store.replace_all(transactions) {
        Ok(()) => "Database initialized".into_response(),
        Err(error) => error.into_response(),
    }
}
