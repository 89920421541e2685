use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use budget_tracker::{
    Category, NewIncome, Transaction, create_income, create_transaction, initialize_db,
};

/// A utility for creating a test database for the budget_tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();

    println!("Creating sample transactions...");
    let transactions = [
        ("Groceries", 84.20, Category::Food, 0),
        ("Coffee", 4.50, Category::Food, 1),
        ("Bus fare", 3.50, Category::Transport, 1),
        ("Movie tickets", 32.00, Category::Fun, 3),
        ("Power bill", 120.75, Category::Misc, 6),
        ("Fuel", 65.10, Category::Transport, 9),
    ];

    for (name, amount, category, days_ago) in transactions {
        create_transaction(
            Transaction::build(name, amount, category, today - Duration::days(days_ago)),
            &conn,
        )?;
    }

    println!("Creating sample income...");
    for (amount, days_ago) in [(1500.0, 2), (1500.0, 16)] {
        create_income(
            NewIncome {
                amount,
                date: today - Duration::days(days_ago),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
