//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::Category, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// What the money was spent on.
    pub name: String,
    /// The amount of money spent in dollars.
    pub amount: f64,
    /// The category of the expense.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(name: &str, amount: f64, category: Category, date: Date) -> NewTransaction {
        NewTransaction {
            name: name.to_owned(),
            amount,
            category,
            date,
        }
    }
}

/// The data for a transaction that has not been stored yet.
///
/// The database assigns the ID when the transaction is inserted with
/// [create_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// What the money was spent on.
    pub name: String,
    /// The amount of money spent in dollars.
    ///
    /// Amounts are stored as entered, callers are expected to reject negative
    /// amounts before they get here.
    pub amount: f64,
    /// The category of the expense.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transactions table in the database.
///
/// The category column is constrained to the names of [Category::ALL].
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    let category_names = Category::ALL
        .iter()
        .map(|category| format!("'{}'", category.name()))
        .collect::<Vec<_>>()
        .join(", ");

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL CONSTRAINT valid_category CHECK (category IN ({category_names})),
                date TEXT NOT NULL
            )"
        ),
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Transaction {
        id,
        name,
        amount,
        category,
        date,
    })
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (name, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, amount, category, date",
        )?
        .query_row(
            (
                transaction.name,
                transaction.amount,
                transaction.category,
                transaction.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare("SELECT id, name, amount, category, date FROM transactions WHERE id = :id")?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions in the order they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    query_transactions(
        "SELECT id, name, amount, category, date FROM transactions ORDER BY id ASC",
        connection,
    )
}

/// Retrieve all transactions sorted by date, oldest first.
///
/// Transactions on the same day are kept in the order they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_date(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    query_transactions(
        "SELECT id, name, amount, category, date FROM transactions ORDER BY date ASC, id ASC",
        connection,
    )
}

/// Retrieve the transactions in `category` in the order they were created.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_category(
    category: Category,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, category, date FROM transactions
             WHERE category = :category ORDER BY id ASC",
        )?
        .query_map(&[(":category", &category)], map_transaction_row)?
        .map(|transaction| transaction.map_err(Error::from))
        .collect()
}

fn query_transactions(query: &str, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(query)?
        .query_map([], map_transaction_row)?
        .map(|transaction| transaction.map_err(Error::from))
        .collect()
}

/// Delete the transaction with `id`.
///
/// Returns `true` if the transaction existed and was deleted, `false` if there
/// was no transaction with `id`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected =
        connection.execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])?;

    Ok(rows_affected != 0)
}

/// Delete every transaction in `category`, returning how many were deleted.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transactions_in_category(
    category: Category,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "DELETE FROM transactions WHERE category = :category",
            &[(":category", &category)],
        )
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::Category,
        db::initialize,
        transaction::{
            Transaction, count_transactions, create_transaction, delete_transaction,
            delete_transactions_in_category, get_all_transactions, get_transaction,
            get_transactions_by_category, get_transactions_by_date,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build("Amazon", 50.0, Category::Fun, date!(2025 - 07 - 08)),
            &conn,
        )
        .expect("Could not create transaction");

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.name, "Amazon");
        assert_eq!(transaction.amount, 50.0);
        assert_eq!(transaction.category, Category::Fun);
        assert_eq!(transaction.date, date!(2025 - 07 - 08));
    }

    #[test]
    fn created_transaction_is_listed_with_unique_id() {
        let conn = get_test_connection();
        let starbucks = create_transaction(
            Transaction::build("Starbucks", 5.75, Category::Food, date!(2025 - 07 - 08)),
            &conn,
        )
        .unwrap();
        let netflix = create_transaction(
            Transaction::build("Netflix", 15.99, Category::Fun, date!(2025 - 07 - 08)),
            &conn,
        )
        .unwrap();

        let transactions = get_all_transactions(&conn).unwrap();

        assert_eq!(transactions, vec![starbucks, netflix]);
        let ids: HashSet<_> = transactions.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids.len(), transactions.len(), "ids should be unique");
    }

    #[test]
    fn invalid_category_does_not_change_table() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build("Bus", 3.5, Category::Transport, date!(2025 - 07 - 08)),
            &conn,
        )
        .unwrap();

        let result = conn
            .execute(
                "INSERT INTO transactions (name, amount, category, date) VALUES ('Rent', 500.0, 'RENT', '2025-07-08')",
                (),
            )
            .map_err(Error::from);

        assert!(matches!(result, Err(Error::InvalidCategory(_))));
        assert_eq!(count_transactions(&conn), Ok(1));
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn by_date_sorts_oldest_first() {
        let conn = get_test_connection();
        let later = create_transaction(
            Transaction::build("Later", 1.0, Category::Misc, date!(2025 - 07 - 10)),
            &conn,
        )
        .unwrap();
        let earlier = create_transaction(
            Transaction::build("Earlier", 2.0, Category::Misc, date!(2025 - 07 - 01)),
            &conn,
        )
        .unwrap();
        let same_day = create_transaction(
            Transaction::build("Same day", 3.0, Category::Misc, date!(2025 - 07 - 01)),
            &conn,
        )
        .unwrap();

        let transactions = get_transactions_by_date(&conn).unwrap();

        assert_eq!(transactions, vec![earlier, same_day, later]);
    }

    #[test]
    fn by_category_preserves_order() {
        let conn = get_test_connection();
        let today = date!(2025 - 07 - 08);
        let lunch = create_transaction(
            Transaction::build("Lunch", 12.0, Category::Food, today),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build("Train", 4.0, Category::Transport, today),
            &conn,
        )
        .unwrap();
        let dinner = create_transaction(
            Transaction::build("Dinner", 30.0, Category::Food, today),
            &conn,
        )
        .unwrap();

        let food = get_transactions_by_category(Category::Food, &conn).unwrap();

        assert_eq!(food, vec![lunch, dinner]);
    }

    #[test]
    fn delete_existing_transaction() {
        let conn = get_test_connection();
        let today = date!(2025 - 07 - 08);
        let keep = create_transaction(Transaction::build("Keep", 1.0, Category::Fun, today), &conn)
            .unwrap();
        let remove =
            create_transaction(Transaction::build("Remove", 2.0, Category::Fun, today), &conn)
                .unwrap();

        let deleted = delete_transaction(remove.id, &conn).unwrap();

        assert!(deleted);
        assert_eq!(get_all_transactions(&conn).unwrap(), vec![keep]);
        assert_eq!(get_transaction(remove.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_leaves_table_unchanged() {
        let conn = get_test_connection();
        let today = date!(2025 - 07 - 08);
        let transaction =
            create_transaction(Transaction::build("Keep", 1.0, Category::Fun, today), &conn)
                .unwrap();

        let deleted = delete_transaction(transaction.id + 1, &conn).unwrap();

        assert!(!deleted);
        assert_eq!(get_all_transactions(&conn).unwrap(), vec![transaction]);
    }

    #[test]
    fn delete_in_category_only_removes_that_category() {
        let conn = get_test_connection();
        let today = date!(2025 - 07 - 08);
        create_transaction(
            Transaction::build("Salary", 1000.0, Category::Income, today),
            &conn,
        )
        .unwrap();
        let food = create_transaction(
            Transaction::build("Groceries", 80.0, Category::Food, today),
            &conn,
        )
        .unwrap();

        let deleted = delete_transactions_in_category(Category::Income, &conn).unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(get_all_transactions(&conn).unwrap(), vec![food]);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build("", i as f64, Category::Misc, today),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
