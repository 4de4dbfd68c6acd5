//! The income and expense models and how they are stored.
//!
//! Incomes and expenses share the same shape, an [Entry], and are kept in
//! separate tables.

use rusqlite::{Connection, Row, ToSql};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    database_id::DatabaseId,
    db::{CreateTable, Record},
};

/// The fields shared by incomes and expenses.
///
/// Field names on the wire are Portuguese, English names are accepted when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// A short title, empty if the client did not provide one.
    #[serde(rename = "nome", alias = "name", default)]
    pub name: String,
    /// A free-form description.
    #[serde(rename = "descricao", alias = "description")]
    pub description: String,
    /// The amount of money.
    #[serde(rename = "valor", alias = "amount")]
    pub amount: f64,
    /// When the money came in or went out.
    #[serde(rename = "data", alias = "date")]
    pub date: Date,
    /// A free-form category, e.g. "food".
    #[serde(rename = "categoria", alias = "category")]
    pub category: String,
}

/// Money received ("receita").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// The ID of the income.
    pub id: DatabaseId,
    /// The income's fields.
    #[serde(flatten)]
    pub entry: Entry,
}

/// Money spent ("despesa").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: DatabaseId,
    /// The expense's fields.
    #[serde(flatten)]
    pub entry: Entry,
}

/// A record that stores an [Entry].
pub trait LedgerRecord: Record<Fields = Entry> {
    /// The name of the record type used in error messages.
    const KIND: &'static str;
}

impl LedgerRecord for Income {
    const KIND: &'static str = "receita";
}

impl LedgerRecord for Expense {
    const KIND: &'static str = "despesa";
}

const ENTRY_COLUMNS: &[&str] = &["name", "description", "amount", "date", "category"];

fn create_entry_table(table: &str, connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL
            )"
        ),
        (),
    )?;

    Ok(())
}

fn entry_params(entry: &Entry) -> Vec<&dyn ToSql> {
    vec![
        &entry.name,
        &entry.description,
        &entry.amount,
        &entry.date,
        &entry.category,
    ]
}

fn map_row_to_entry(row: &Row) -> Result<(DatabaseId, Entry), rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let description = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let category = row.get(5)?;

    Ok((
        id,
        Entry {
            name,
            description,
            amount,
            date,
            category,
        },
    ))
}

impl CreateTable for Income {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        create_entry_table(Self::TABLE, connection)
    }
}

impl Record for Income {
    type Fields = Entry;

    const TABLE: &'static str = "receita";
    const COLUMNS: &'static [&'static str] = ENTRY_COLUMNS;

    fn from_fields(id: DatabaseId, entry: Entry) -> Self {
        Self { id, entry }
    }

    fn to_params(entry: &Entry) -> Vec<&dyn ToSql> {
        entry_params(entry)
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        map_row_to_entry(row).map(|(id, entry)| Self { id, entry })
    }
}

impl CreateTable for Expense {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        create_entry_table(Self::TABLE, connection)
    }
}

impl Record for Expense {
    type Fields = Entry;

    const TABLE: &'static str = "despesa";
    const COLUMNS: &'static [&'static str] = ENTRY_COLUMNS;

    fn from_fields(id: DatabaseId, entry: Entry) -> Self {
        Self { id, entry }
    }

    fn to_params(entry: &Entry) -> Vec<&dyn ToSql> {
        entry_params(entry)
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        map_row_to_entry(row).map(|(id, entry)| Self { id, entry })
    }
}
