//! Defines the transaction record model.

use serde::{Deserialize, Serialize};

/// Alias for the type used for database row IDs.
pub type DatabaseID = i64;

/// A product sale transaction from the upstream dataset.
///
/// Records are bulk-created by the initialize endpoint and are read-only
/// afterwards. The date of sale keeps the source's date-time string verbatim
/// because month filtering works on the text form, see
/// [TransactionQuery](crate::stores::TransactionQuery).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction in the upstream dataset and the database.
    pub id: DatabaseID,
    /// The product title.
    pub title: String,
    /// The product description.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// The product category label.
    pub category: String,
    /// The date of sale as a sortable date-time string,
    /// e.g. "2021-11-27T20:29:54+05:30".
    pub date_of_sale: String,
    /// Whether the product was sold.
    pub sold: bool,
}
