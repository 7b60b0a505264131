use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use fintrack_rs::{
    Category, NewGoal, Transaction, TransactionType, apply_progress, initialize_db,
    stores::{
        GoalStore, TransactionStore,
        sqlite::{SQLiteGoalStore, SQLiteTransactionStore},
    },
};

/// A utility for creating a test database for the REST API server of fintrack_rs.
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
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let transaction_store = SQLiteTransactionStore::new(conn.clone());
    let goal_store = SQLiteGoalStore::new(conn);
    let now = OffsetDateTime::now_utc();

    println!("Creating test transactions...");

    let transactions = [
        ("Salary", Decimal::new(500000, 2), TransactionType::Income, None),
        ("Rent", Decimal::new(120000, 2), TransactionType::Expense, None),
        ("Supermarket", Decimal::new(35000, 2), TransactionType::Expense, None),
        ("Cinema", Decimal::new(5000, 2), TransactionType::Expense, None),
        ("Uber to work", Decimal::new(2340, 2), TransactionType::Expense, None),
        (
            "Birthday present",
            Decimal::new(8000, 2),
            TransactionType::Expense,
            Some(Category::Other),
        ),
    ];

    for (days_ago, (description, amount, transaction_type, category)) in
        (0_i64..).zip(transactions.into_iter().rev())
    {
        let builder =
            Transaction::build(description, amount, transaction_type, now - Duration::days(days_ago))?;
        let builder = match category {
            Some(category) => builder.category(category),
            None => builder,
        };

        transaction_store.create(builder)?;
    }

    println!("Creating test goals...");

    let trip = goal_store.create(
        NewGoal::new("Trip to Europe", Decimal::new(300000, 2), now)?
            .description(Some("Two weeks in summer".to_owned()))
            .deadline(Some(now + Duration::days(180))),
    )?;
    goal_store.update_with(trip.id, &|goal| apply_progress(goal, Decimal::new(100000, 2)))?;

    let fund = goal_store.create(NewGoal::new("Emergency fund", Decimal::new(50000, 2), now)?)?;
    goal_store.update_with(fund.id, &|goal| apply_progress(goal, Decimal::new(50000, 2)))?;

    println!("Success!");

    Ok(())
}
