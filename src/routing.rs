//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState,
    charts::{get_bar_chart, get_combined_data, get_pie_chart, get_statistics},
    endpoints,
    import::initialize_database,
    stores::TransactionStore,
    transactions::get_transactions,
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::INITIALIZE, get(initialize_database::<T>))
        .route(endpoints::TRANSACTIONS, get(get_transactions::<T>))
        .route(endpoints::STATISTICS, get(get_statistics::<T>))
        .route(endpoints::BAR_CHART, get(get_bar_chart::<T>))
        .route(endpoints::PIE_CHART, get(get_pie_chart::<T>))
        .route(endpoints::COMBINED_DATA, get(get_combined_data::<T>))
        .with_state(state)
}
