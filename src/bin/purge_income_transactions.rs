use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use budget_tracker::{Category, delete_transactions_in_category, initialize_db};

/// Delete transactions recorded with the legacy INCOME category.
///
/// Income is stored separately from transactions, so these rows would
/// otherwise be counted as expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    if !db_path.is_file() {
        eprintln!("No database found at {db_path:#?}");
        exit(1);
    }

    let conn = Connection::open(db_path)?;
    initialize_db(&conn)?;

    let deleted = delete_transactions_in_category(Category::Income, &conn)?;

    println!("Deleted {deleted} income transaction(s).");

    Ok(())
}
