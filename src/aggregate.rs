//! Pure aggregation passes over a set of transactions.
//!
//! Both the single-purpose chart endpoints and the combined endpoint go
//! through these functions, so the two code paths cannot drift apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Summary statistics for a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the price over all transactions, sold or not.
    pub total_sale: f64,
    /// The number of sold transactions.
    pub sold_items: u64,
    /// The number of unsold transactions.
    pub not_sold_items: u64,
}

/// The labels of the ten fixed price buckets, in display order.
///
/// The labels sort lexicographically in bucket order, so a [BTreeMap] keyed
/// by them serializes in display order.
pub const PRICE_BUCKETS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// Compute summary statistics over `transactions`.
pub fn statistics(transactions: &[Transaction]) -> Statistics {
    let total_sale = transactions.iter().map(|t| t.price).sum();
    let sold_items = transactions.iter().filter(|t| t.sold).count() as u64;
    let not_sold_items = transactions.len() as u64 - sold_items;

    Statistics {
        total_sale,
        sold_items,
        not_sold_items,
    }
}

/// Count `transactions` into the ten fixed price buckets.
///
/// Buckets use inclusive upper bounds: a price of exactly 100 falls in
/// "0-100" and 101 falls in "101-200". Every bucket appears in the result,
/// including those with a count of zero.
pub fn price_histogram(transactions: &[Transaction]) -> BTreeMap<String, u64> {
    let mut histogram: BTreeMap<String, u64> = PRICE_BUCKETS
        .iter()
        .map(|label| (label.to_string(), 0))
        .collect();

    for transaction in transactions {
        *histogram
            .entry(price_bucket(transaction.price).to_owned())
            .or_insert(0) += 1;
    }

    histogram
}

/// The label of the fixed price bucket that `price` falls into.
fn price_bucket(price: f64) -> &'static str {
    if price <= 100.0 {
        "0-100"
    } else if price <= 200.0 {
        "101-200"
    } else if price <= 300.0 {
        "201-300"
    } else if price <= 400.0 {
        "301-400"
    } else if price <= 500.0 {
        "401-500"
    } else if price <= 600.0 {
        "501-600"
    } else if price <= 700.0 {
        "601-700"
    } else if price <= 800.0 {
        "701-800"
    } else if price <= 900.0 {
        "801-900"
    } else {
        "901-above"
    }
}

/// Count `transactions` per category label.
///
/// Only categories that appear in `transactions` are present in the result;
/// there are no zero entries.
pub fn category_histogram(transactions: &[Transaction]) -> BTreeMap<String, u64> {
    let mut histogram = BTreeMap::new();

    for transaction in transactions {
        *histogram.entry(transaction.category.clone()).or_insert(0) += 1;
    }

    histogram
}
