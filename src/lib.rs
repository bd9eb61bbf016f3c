//! Salestats is the backend for a small transaction-analytics dashboard.
//!
//! This library provides a JSON REST API over a SQLite datastore of product
//! sale transactions: a paginated, searchable transaction list plus summary
//! statistics, a price histogram and a category histogram, all keyed by
//! calendar month. The datastore is bulk-loaded from a remote dataset via the
//! initialize endpoint.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregate;
mod app_state;
mod charts;
mod endpoints;
mod error;
mod import;
mod models;
mod pagination;
mod routing;
mod transactions;

pub mod stores;

pub use aggregate::{PRICE_BUCKETS, Statistics};
pub use app_state::AppState;
pub use error::Error;
pub use import::DEFAULT_SOURCE_URL;
pub use models::Transaction;
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
