//! Income, i.e. money received.
//!
//! Income is recorded separately from transactions and only has an amount
//! and a date.

mod core;
mod page;

pub use core::{Income, NewIncome, create_income, create_income_table, get_all_income};
pub use page::{create_income_endpoint, get_create_income_page};
