//! The transaction listing endpoint.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    models::Transaction,
    stores::{TransactionQuery, TransactionStore},
};

/// The query parameters accepted by the transaction list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// The month token the date of sale is filtered by.
    pub month: Option<String>,
    /// Free text matched against title, description and price.
    pub search: Option<String>,
    /// The page number, starting at 1.
    pub page: Option<u64>,
    /// The number of transactions per page.
    pub per_page: Option<u64>,
}

/// One page of matching transactions, the total match count and the echoed
/// pagination parameters.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page.
    pub transactions: Vec<Transaction>,
    /// The total number of matching transactions across all pages.
    pub total: u64,
    /// The page number that was served.
    pub page: u64,
    /// The page size that was applied.
    pub per_page: u64,
}

/// A route handler for listing a page of transactions matching a month and
/// an optional search term.
pub async fn get_transactions<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ListParams>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    let page = params.page.unwrap_or(state.pagination_config.default_page);
    let per_page = params
        .per_page
        .unwrap_or(state.pagination_config.default_page_size);

    let query = TransactionQuery {
        month: params.month,
        search: params.search,
        limit: Some(per_page),
        offset: page.saturating_sub(1).saturating_mul(per_page),
    };

    let total = match state.transaction_store.count(&query) {
        Ok(total) => total,
        Err(error) => return error.into_response(),
    };

    let transactions = match state.transaction_store.get_query(query) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };

    Json(TransactionPage {
        transactions,
        total,
        page,
        per_page,
    })
    .into_response()
}
