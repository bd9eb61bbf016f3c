//! Defines the transaction store trait and the query type used to filter it.

pub mod sqlite;

pub use sqlite::SqliteTransactionStore;

use crate::{Error, models::Transaction};

/// Handles the bulk loading and retrieval of transactions.
pub trait TransactionStore {
    /// Replace the entire contents of the store with `transactions`.
    ///
    /// This is a destructive reload: every previously stored row is removed.
    /// Implementers must either complete the reload fully or leave the prior
    /// contents untouched.
    fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    ///
    /// Rows are returned in the store's default order.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching the month and search terms of `query`,
    /// ignoring its pagination fields.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    /// Include transactions whose date of sale contains this token as a
    /// case-insensitive substring.
    ///
    /// This is a textual match, not a parsed-date comparison: a token of "1"
    /// also matches "11", "10" and year digits. Pass a zero-padded month such
    /// as "03" to select a single calendar month across all years.
    pub month: Option<String>,
    /// Include transactions whose title, description or price text contains
    /// this term as a case-insensitive substring.
    pub search: Option<String>,
    /// Selects up to the first N (`limit`) matching transactions. When
    /// `None`, all matching transactions are returned and `offset` is
    /// ignored.
    pub limit: Option<u64>,
    /// The number of matching transactions to skip before `limit` applies.
    pub offset: u64,
}
