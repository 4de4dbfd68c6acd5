//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::{SQLiteStore, initialize},
    ledger::{ExpenseService, IncomeService},
    user::UserService,
};

/// The state of the REST server.
///
/// The services share a single database connection.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registers, fetches and authenticates users.
    pub users: UserService,

    /// Stores incomes.
    pub incomes: IncomeService,

    /// Stores expenses.
    pub expenses: ExpenseService,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `password_cost` is the bcrypt cost used when hashing new passwords.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, password_cost: u32) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            users: UserService::new(SQLiteStore::new(connection.clone()), password_cost),
            incomes: IncomeService::new(SQLiteStore::new(connection.clone())),
            expenses: ExpenseService::new(SQLiteStore::new(connection)),
        })
    }
}
