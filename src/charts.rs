//! The chart endpoints: statistics, bar chart, pie chart and combined data.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::{
    AppState, Error,
    aggregate::{self, Statistics},
    models::Transaction,
    stores::{TransactionQuery, TransactionStore},
};

/// The query parameters accepted by the chart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    /// The month token the date of sale is filtered by.
    pub month: Option<String>,
}

fn month_query(month: Option<String>) -> TransactionQuery {
    TransactionQuery {
        month,
        ..Default::default()
    }
}

/// A route handler for summary statistics for a month.
pub async fn get_statistics<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ChartParams>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    match state.transaction_store.get_query(month_query(params.month)) {
        Ok(transactions) => Json(aggregate::statistics(&transactions)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for the counts of the ten fixed price buckets for a month.
pub async fn get_bar_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ChartParams>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    match state.transaction_store.get_query(month_query(params.month)) {
        Ok(transactions) => Json(aggregate::price_histogram(&transactions)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for the per-category counts for a month.
pub async fn get_pie_chart<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ChartParams>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    match state.transaction_store.get_query(month_query(params.month)) {
        Ok(transactions) => Json(aggregate::category_histogram(&transactions)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// The transaction list and all three summary views for one month.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// All transactions for the month, unpaginated.
    pub transactions: Vec<Transaction>,
    /// Summary statistics for the month.
    pub statistics: Statistics,
    /// Price-bucket counts for the month.
    pub bar_chart: BTreeMap<String, u64>,
    /// Per-category counts for the month.
    pub pie_chart: BTreeMap<String, u64>,
}

/// A route handler that returns the transaction list and all three summary
/// views for one month in a single response.
pub async fn get_combined_data<T>(
    State(state): State<AppState<T>>,
    Query(params): Query<ChartParams>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    match combined_data(&state, params.month).await {
        Ok(combined) => Json(combined).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Execute the four month queries concurrently and reduce them into a
/// [CombinedData].
///
/// The response is produced only once every query completes; if any one
/// fails, the whole request fails with no partial result.
async fn combined_data<T>(
    state: &AppState<T>,
    month: Option<String>,
) -> Result<CombinedData, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let list = query_task(&state.transaction_store, month.clone());
    let stats = query_task(&state.transaction_store, month.clone());
    let bar = query_task(&state.transaction_store, month.clone());
    let pie = query_task(&state.transaction_store, month);

    let (list, stats, bar, pie) = tokio::try_join!(list, stats, bar, pie)?;

    Ok(CombinedData {
        transactions: list?,
        statistics: aggregate::statistics(&stats?),
        bar_chart: aggregate::price_histogram(&bar?),
        pie_chart: aggregate::category_histogram(&pie?),
    })
}

/// Run a month query on its own blocking task so the four combined queries
/// can proceed concurrently.
fn query_task<T>(
    store: &T,
    month: Option<String>,
) -> JoinHandle<Result<Vec<Transaction>, Error>>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let store = store.clone();

    tokio::task::spawn_blocking(move || store.get_query(month_query(month)))
}
