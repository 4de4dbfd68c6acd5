use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use smartcash::{AppState, Entry, PasswordHash, UserForm};

/// A utility for creating a test database for the REST API server of SmartCash.
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

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let state = AppState::new(conn, PasswordHash::DEFAULT_COST)?;

    println!("Creating test user...");
    let user = state.users.create(UserForm {
        name: "Teste".to_owned(),
        email: "teste@teste.com".to_owned(),
        password: "senha1234".to_owned(),
    })?;
    println!("Log in with {} and password 'senha1234'", user.email);

    println!("Creating sample income and expense...");
    state.incomes.create(Entry {
        name: "Salário".to_owned(),
        description: "Salário mensal".to_owned(),
        amount: 5000.0,
        date: date!(2024 - 01 - 05),
        category: "trabalho".to_owned(),
    })?;
    state.expenses.create(Entry {
        name: "Almoço".to_owned(),
        description: "Almoço no restaurante".to_owned(),
        amount: 35.9,
        date: date!(2024 - 01 - 08),
        category: "alimentação".to_owned(),
    })?;

    println!("Success!");

    Ok(())
}
