//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    AppState, Error,
    models::Transaction,
    pagination::PaginationConfig,
    stores::{TransactionQuery, TransactionStore},
};

/// An [AppState] backed by a SQLite database.
pub type SqlAppState = AppState<SqliteTransactionStore>;

/// Create an [AppState] backed by the SQLite database `connection`.
///
/// This function will initialize the database by adding the transaction
/// table if it does not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if the table cannot be created.
pub fn create_app_state(
    connection: Connection,
    source_url: &str,
    pagination_config: PaginationConfig,
) -> Result<SqlAppState, Error> {
    SqliteTransactionStore::create_table(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    Ok(AppState::new(
        source_url,
        pagination_config,
        SqliteTransactionStore::new(connection),
    ))
}

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Add the transaction table to the database.
    pub fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL,
                    category TEXT NOT NULL,
                    date_of_sale TEXT NOT NULL,
                    sold INTEGER NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            category: row.get(4)?,
            date_of_sale: row.get(5)?,
            sold: row.get(6)?,
        })
    }
}

/// Build the WHERE clause parts for the month and search terms of `query`.
///
/// Returns the clause parts and their positional parameters. SQLite's `LIKE`
/// is case-insensitive for ASCII, which gives the case-insensitive substring
/// semantics both filters require.
fn build_where_clause(query: &TransactionQuery) -> (Vec<String>, Vec<Value>) {
    let mut where_clause_parts = vec![];
    let mut query_parameters = vec![];

    if let Some(month) = &query.month {
        where_clause_parts.push(format!(
            "date_of_sale LIKE ?{}",
            query_parameters.len() + 1
        ));
        query_parameters.push(Value::Text(format!("%{month}%")));
    }

    if let Some(search) = &query.search {
        let offset = query_parameters.len();
        where_clause_parts.push(format!(
            "(title LIKE ?{} OR description LIKE ?{} OR CAST(price AS TEXT) LIKE ?{})",
            offset + 1,
            offset + 2,
            offset + 3,
        ));

        let pattern = format!("%{search}%");
        query_parameters.push(Value::Text(pattern.clone()));
        query_parameters.push(Value::Text(pattern.clone()));
        query_parameters.push(Value::Text(pattern));
    }

    (where_clause_parts, query_parameters)
}

impl TransactionStore for SqliteTransactionStore {
    /// Replace the entire contents of the database with `transactions`.
    ///
    /// The delete and the inserts run inside a single SQL transaction, so a
    /// failed reload leaves the previous rows in place.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();

        let tx = connection.unchecked_transaction()?;
        tx.execute("DELETE FROM \"transaction\"", ())?;

        // Prepare the insert statement once for reuse
        let mut stmt = tx.prepare(
            "INSERT INTO \"transaction\" (id, title, description, price, category, date_of_sale, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for transaction in transactions {
            stmt.execute((
                transaction.id,
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.date_of_sale,
                transaction.sold,
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(())
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, title, description, price, category, date_of_sale, sold \
             FROM \"transaction\""
                .to_string(),
        ];

        let (where_clause_parts, query_parameters) = build_where_clause(&query);

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        if let Some(limit) = query.limit {
            query_string_parts.push(format!("LIMIT {limit} OFFSET {}", query.offset));
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Get the number of transactions matching the month and search terms of
    /// `query`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let mut query_string_parts = vec!["SELECT COUNT(id) FROM \"transaction\"".to_string()];

        let (where_clause_parts, query_parameters) = build_where_clause(query);

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        let query_string = query_string_parts.join(" ");

        self.connection
            .lock()
            .unwrap()
            .query_row(
                &query_string,
                params_from_iter(query_parameters.iter()),
                |row| row.get::<_, i64>(0).map(|count| count as u64),
            )
            .map_err(|error| error.into())
    }
}

#[cfg(test)]
mod sqlite_transaction_store_tests {
    use rusqlite::Connection;

    use crate::{
        models::Transaction,
        stores::{TransactionQuery, TransactionStore},
    };

    use super::SqliteTransactionStore;

    fn get_store() -> SqliteTransactionStore {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        SqliteTransactionStore::create_table(&connection)
            .expect("Could not create transaction table.");

        SqliteTransactionStore::new(std::sync::Arc::new(std::sync::Mutex::new(connection)))
    }

    fn transaction(id: i64, title: &str, price: f64, date_of_sale: &str) -> Transaction {
        Transaction {
            id,
            title: title.to_owned(),
            description: format!("description of {title}"),
            price,
            category: "electronics".to_owned(),
            date_of_sale: date_of_sale.to_owned(),
            sold: true,
        }
    }

    #[test]
    fn replace_all_removes_previous_rows() {
        let mut store = get_store();
        store
            .replace_all(vec![
                transaction(1, "Laptop", 700.0, "2021-03-01T10:00:00+05:30"),
                transaction(2, "Mouse", 25.0, "2021-04-01T10:00:00+05:30"),
            ])
            .expect("Could not load initial transactions");

        let want = vec![transaction(7, "Keyboard", 45.0, "2022-01-15T10:00:00+05:30")];
        store
            .replace_all(want.clone())
            .expect("Could not replace transactions");

        let got = store
            .get_query(TransactionQuery::default())
            .expect("Could not query transactions");

        assert_eq!(got, want, "want only the reloaded rows, got {got:?}");
    }

    #[test]
    fn get_query_filters_by_month_substring() {
        let mut store = get_store();
        let march = transaction(1, "Laptop", 700.0, "2021-03-01T10:00:00+05:30");
        let another_march = transaction(2, "Mouse", 25.0, "2022-03-10T10:00:00+05:30");
        let november = transaction(3, "Keyboard", 45.0, "2021-11-27T20:29:54+05:30");
        store
            .replace_all(vec![march.clone(), another_march.clone(), november])
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery {
                month: Some("03".to_owned()),
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got, vec![march, another_march]);
    }

    #[test]
    fn bare_month_token_matches_embedded_digits() {
        let mut store = get_store();
        store
            .replace_all(vec![
                transaction(1, "Laptop", 700.0, "2021-11-27T20:29:54+05:30"),
                transaction(2, "Mouse", 25.0, "2021-10-02T10:00:00+05:30"),
            ])
            .expect("Could not load transactions");

        // "1" is an embedded substring of both "-11-" and "-10-" (and the
        // year), so the textual match returns both rows.
        let got = store
            .get_query(TransactionQuery {
                month: Some("1".to_owned()),
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got.len(), 2, "want both rows to match, got {got:?}");
    }

    #[test]
    fn get_query_matches_search_term_case_insensitively() {
        let mut store = get_store();
        let laptop = transaction(1, "Gaming Laptop", 700.0, "2021-03-01T10:00:00+05:30");
        let mouse = transaction(2, "Mouse", 25.0, "2021-03-10T10:00:00+05:30");
        store
            .replace_all(vec![laptop.clone(), mouse])
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery {
                search: Some("LAPT".to_owned()),
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got, vec![laptop]);
    }

    #[test]
    fn get_query_matches_search_term_against_description() {
        let mut store = get_store();
        let laptop = transaction(1, "Laptop", 700.0, "2021-03-01T10:00:00+05:30");
        store
            .replace_all(vec![laptop.clone()])
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery {
                search: Some("description of lap".to_owned()),
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got, vec![laptop]);
    }

    #[test]
    fn get_query_matches_search_term_against_price_text() {
        let mut store = get_store();
        let laptop = transaction(1, "Laptop", 723.5, "2021-03-01T10:00:00+05:30");
        let mouse = transaction(2, "Mouse", 25.0, "2021-03-10T10:00:00+05:30");
        store
            .replace_all(vec![laptop.clone(), mouse])
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery {
                search: Some("723".to_owned()),
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got, vec![laptop]);
    }

    #[test]
    fn get_query_applies_limit_and_offset() {
        let mut store = get_store();
        let rows: Vec<_> = (1..=25)
            .map(|i| transaction(i, &format!("Item {i}"), i as f64, "2021-03-01T10:00:00+05:30"))
            .collect();
        store
            .replace_all(rows.clone())
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery {
                limit: Some(10),
                offset: 20,
                ..Default::default()
            })
            .expect("Could not query transactions");

        assert_eq!(got, rows[20..], "want rows 21 through 25, got {got:?}");
    }

    #[test]
    fn count_ignores_pagination() {
        let mut store = get_store();
        let rows: Vec<_> = (1..=25)
            .map(|i| transaction(i, &format!("Item {i}"), i as f64, "2021-03-01T10:00:00+05:30"))
            .collect();
        store.replace_all(rows).expect("Could not load transactions");

        let got = store
            .count(&TransactionQuery {
                month: Some("03".to_owned()),
                limit: Some(10),
                offset: 20,
                ..Default::default()
            })
            .expect("Could not count transactions");

        assert_eq!(got, 25);
    }

    #[test]
    fn absent_filters_match_everything() {
        let mut store = get_store();
        store
            .replace_all(vec![
                transaction(1, "Laptop", 700.0, "2021-03-01T10:00:00+05:30"),
                transaction(2, "Mouse", 25.0, "2021-11-27T20:29:54+05:30"),
            ])
            .expect("Could not load transactions");

        let got = store
            .get_query(TransactionQuery::default())
            .expect("Could not query transactions");

        assert_eq!(got.len(), 2);
    }
}
