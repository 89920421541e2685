//! Transactions, i.e. money spent in one of the expense categories.
//!
//! This module contains everything related to transactions:
//! - The [Transaction] model and the database functions for storing,
//!   querying and deleting transactions
//! - The form for submitting a new transaction and its validation
//! - The route handlers for the transaction pages and the JSON API

mod api;
mod category_page;
mod core;
mod create_endpoint;
mod create_page;
mod delete;
mod form;
mod transactions_page;

pub use api::{create_transaction_api, get_categories_api, get_transactions_api};
pub use category_page::{get_category_page, post_category_page};
pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction, create_transaction_table,
    delete_transaction, delete_transactions_in_category, get_all_transactions, get_transaction,
    get_transactions_by_category, get_transactions_by_date,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete::{delete_transaction_endpoint, get_delete_transaction_page};
pub use transactions_page::get_transactions_page;

pub(crate) use form::validate_amount;
