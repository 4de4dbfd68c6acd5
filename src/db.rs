/*! This module defines the traits and the generic store for persisting the application's records. */

use std::{
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, ToSql, Transaction as SqlTransaction};

use crate::{
    Error,
    database_id::DatabaseId,
    ledger::{Expense, Income},
    user::User,
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A type that is stored as one row of a table with an integer primary key `id`.
///
/// The row holds the `id` in the first column followed by [Record::COLUMNS]
/// in order.
pub trait Record: CreateTable + Sized {
    /// The values that make up a record, excluding its ID.
    type Fields;

    /// The name of the table the records live in.
    const TABLE: &'static str;

    /// The names of the columns after `id`, in the order they are bound.
    const COLUMNS: &'static [&'static str];

    /// Combine an ID assigned by the database with the stored fields.
    fn from_fields(id: DatabaseId, fields: Self::Fields) -> Self;

    /// The SQL parameters for `fields`, one per entry in [Record::COLUMNS].
    fn to_params(fields: &Self::Fields) -> Vec<&dyn ToSql>;

    /// Convert a row into a concrete type.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type.
    fn map_row(row: &Row) -> Result<Self, rusqlite::Error>;
}

type RowsAffected = usize;

/// Handles the creation, retrieval, update and deletion of records of type `R`.
///
/// All stores created from the same connection share it, so each call locks
/// the connection for the duration of a single statement.
#[derive(Debug)]
pub struct SQLiteStore<R> {
    connection: Arc<Mutex<Connection>>,
    record: PhantomData<fn() -> R>,
}

impl<R> Clone for SQLiteStore<R> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            record: PhantomData,
        }
    }
}

impl<R: Record> SQLiteStore<R> {
    /// Create a new store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            connection,
            record: PhantomData,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    /// Insert `fields` as a new record and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::UniqueViolation] if a UNIQUE constraint failed or
    /// [Error::SqlError] for other SQL errors.
    pub fn create(&self, fields: R::Fields) -> Result<R, Error> {
        let connection = self.lock()?;

        let placeholders = (1..=R::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");

        connection.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({placeholders})",
                R::TABLE,
                R::COLUMNS.join(", ")
            ),
            R::to_params(&fields).as_slice(),
        )?;

        let id = connection.last_insert_rowid();

        Ok(R::from_fields(id, fields))
    }

    /// Get the record with the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such record or
    /// [Error::SqlError] if there are SQL related errors.
    pub fn get(&self, id: DatabaseId) -> Result<R, Error> {
        self.get_by("id", &id)
    }

    /// Get the first record whose `column` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such record or
    /// [Error::SqlError] if there are SQL related errors.
    pub fn get_by(&self, column: &str, value: &dyn ToSql) -> Result<R, Error> {
        self.lock()?
            .prepare(&format!(
                "SELECT id, {} FROM {} WHERE {column} = ?1",
                R::COLUMNS.join(", "),
                R::TABLE
            ))?
            .query_row([value], R::map_row)
            .map_err(Error::from)
    }

    /// Get every record, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::SqlError] if there are SQL related errors.
    pub fn get_all(&self) -> Result<Vec<R>, Error> {
        self.lock()?
            .prepare(&format!(
                "SELECT id, {} FROM {} ORDER BY id ASC",
                R::COLUMNS.join(", "),
                R::TABLE
            ))?
            .query_map([], R::map_row)?
            .map(|maybe_record| maybe_record.map_err(Error::from))
            .collect()
    }

    /// Overwrite every field of the record with the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such record,
    /// [Error::UniqueViolation] if a UNIQUE constraint failed, or
    /// [Error::SqlError] for other SQL errors.
    pub fn update(&self, id: DatabaseId, fields: R::Fields) -> Result<R, Error> {
        let connection = self.lock()?;

        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");

        let mut params = R::to_params(&fields);
        params.push(&id);

        let rows_affected: RowsAffected = connection.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE id = ?{}",
                R::TABLE,
                R::COLUMNS.len() + 1
            ),
            params.as_slice(),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(R::from_fields(id, fields))
    }

    /// Delete the record with the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no such record or
    /// [Error::SqlError] if there are SQL related errors.
    pub fn delete(&self, id: DatabaseId) -> Result<(), Error> {
        let rows_affected: RowsAffected = self
            .lock()?
            .execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), [&id])?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

/// Create the tables for all of the application's records.
///
/// Existing tables are left untouched, so this is safe to call on every start-up.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    User::create_table(&transaction)?;
    Income::create_table(&transaction)?;
    Expense::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
