use rusqlite::Connection;
use time::Date;

use crate::{
    category::Category,
    db::initialize,
    transaction::{Transaction, create_transaction},
};

pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[track_caller]
pub(crate) fn must_create_transaction(
    name: &str,
    amount: f64,
    category: Category,
    date: Date,
    connection: &Connection,
) -> Transaction {
    create_transaction(Transaction::build(name, amount, category, date), connection)
        .expect("Could not create transaction")
}
