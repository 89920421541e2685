//! Database initialization.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, income::create_income_table, transaction::create_transaction_table};

/// Create the all of the database tables for the application.
///
/// Tables are only created if they do not already exist, so this is safe to
/// call on an existing database.
///
/// # Errors
/// This function may return an [Error::SqlError] if there was an error
/// creating any of the tables.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_income_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
