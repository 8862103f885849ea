use std::env;
use std::error::Error;
use std::path::Path;
use std::process::exit;

use rusqlite::Connection;
use time::macros::date;

use spendy::{CategoryName, NewExpense, create_expense, initialize_db};

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_path>", &args[0]);
        exit(1);
    }

    let output_path = Path::new(&args[1]);

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let samples = [
        ("Flat white", 5.50, "Food", date!(2025 - 07 - 28)),
        ("Weekly groceries", 112.40, "Food", date!(2025 - 07 - 27)),
        ("Bus card top-up", 20.00, "Transport", date!(2025 - 07 - 26)),
        ("Power bill", 148.32, "Utilities", date!(2025 - 07 - 21)),
        ("Movie tickets", 32.00, "Entertainment", date!(2025 - 07 - 19)),
        ("Pharmacy", 18.95, "Health", date!(2025 - 07 - 15)),
        ("Socks", 14.99, "Shopping", date!(2025 - 07 - 12)),
    ];

    for (item, amount, category, date) in samples {
        create_expense(
            NewExpense {
                item: item.to_owned(),
                amount,
                category: CategoryName::new(category),
                date,
            },
            &conn,
        )?;
    }

    Ok(())
}
