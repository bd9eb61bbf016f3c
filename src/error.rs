//! Defines the app level error type and its conversion to an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The remote dataset could not be fetched or parsed.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch the remote dataset: {0}")]
    DatasetFetch(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A background query task was cancelled or panicked before completing.
    #[error("a query task failed to complete: {0}")]
    TaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::DatasetFetch(value.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Error::TaskFailed(value.to_string())
    }
}

impl IntoResponse for Error {
    /// Convert the error into a generic server-error response.
    ///
    /// The client only ever sees a fixed message; the specific cause is
    /// logged on the server.
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
