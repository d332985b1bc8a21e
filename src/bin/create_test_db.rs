use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Month, OffsetDateTime};

use expense_tracker::{ExpenseForm, initialize_db, insert_expense};

/// A utility for creating a test database for the REST API server of expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CATEGORIES: [&str; 5] = ["food", "transport", "shopping", "entertainment", "bills"];

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

    println!("Creating test expenses...");

    let year = OffsetDateTime::now_utc().year();
    let mut count = 0;

    for (month_index, month) in (1..=12u8).map(Month::try_from).enumerate() {
        let month = month?;

        for (category_index, category) in CATEGORIES.iter().enumerate() {
            let day = 1 + ((month_index * 7 + category_index * 5) % 28) as u8;
            let date = time::Date::from_calendar_date(year, month, day)?.with_hms(12, 0, 0)?;

            insert_expense(
                &ExpenseForm {
                    amount: 5.0 + (month_index * CATEGORIES.len() + category_index) as f64 * 2.5,
                    description: Some(format!("Sample {category} expense")),
                    category: Some((*category).to_owned()),
                    date,
                },
                &conn,
            )?;
            count += 1;
        }
    }

    println!("Created {count} expenses.");
    println!("Success!");

    Ok(())
}
