use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use expense_tracker::{
    NewUser, Role, Transaction, TransactionType, add_transaction, create_user, initialize_db,
};

/// A utility for creating a test database for the expense tracker server.
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

    println!("Creating test admin...");
    create_user(
        NewUser {
            name: "Admin".to_owned(),
            email: "admin@example.com".to_owned(),
            password: "admin".to_owned(),
            role: Role::Admin,
        },
        &conn,
    )?;

    println!("Creating test user...");
    let user = create_user(
        NewUser {
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            password: "test".to_owned(),
            role: Role::User,
        },
        &conn,
    )?;

    println!("Creating test transactions...");
    let transactions = [
        (3200.0, TransactionType::Credit, "Salary"),
        (1450.0, TransactionType::Debit, "Rent"),
        (180.25, TransactionType::Debit, "Groceries"),
        (64.99, TransactionType::Debit, "Internet"),
        (250.0, TransactionType::Credit, "Freelance work"),
        (42.5, TransactionType::Debit, "Dinner out"),
    ];

    for (amount, type_, description) in transactions {
        add_transaction(
            &user.id,
            Transaction::build(amount, type_, description),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
