//! Defines the income model and its database queries.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::IncomeId};

/// An amount of money received on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// The ID of the income record.
    pub id: IncomeId,
    /// The amount received in dollars.
    pub amount: f64,
    /// When the income was received.
    pub date: Date,
}

/// The data for income that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    /// The amount received in dollars.
    pub amount: f64,
    /// When the income was received.
    pub date: Date,
}

/// Create the income table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_income_row(row: &Row) -> Result<Income, rusqlite::Error> {
    Ok(Income {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
    })
}

/// Record new income in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_income(income: NewIncome, connection: &Connection) -> Result<Income, Error> {
    let income = connection
        .prepare(
            "INSERT INTO income (amount, date) VALUES (?1, ?2)
             RETURNING id, amount, date",
        )?
        .query_row((income.amount, income.date), map_income_row)?;

    Ok(income)
}

/// Retrieve all income, most recent first.
///
/// Income received on the same day is ordered newest record first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_income(connection: &Connection) -> Result<Vec<Income>, Error> {
    connection
        .prepare("SELECT id, amount, date FROM income ORDER BY date DESC, id DESC")?
        .query_map([], map_income_row)?
        .map(|income| income.map_err(Error::from))
        .collect()
}
