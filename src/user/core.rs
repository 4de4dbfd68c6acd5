//! The user model, the request payloads for users and how users are stored.

use email_address::EmailAddress;
use rusqlite::{Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    db::{CreateTable, Record},
    password::{PasswordHash, ValidatedPassword},
};

/// A registered user of the application.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: DatabaseId,
    /// The user's display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// The user's email address, unique across all users.
    pub email: String,
    /// The user's password hash.
    #[serde(skip_serializing)]
    pub password_hash: PasswordHash,
}

/// The validated values for creating or overwriting a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// The JSON body for creating or updating a user.
///
/// Missing fields default to empty strings so that validation can report
/// which field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    /// The user's display name.
    #[serde(rename = "nome", alias = "name", default)]
    pub name: String,
    /// The user's email address.
    #[serde(default)]
    pub email: String,
    /// The raw password.
    #[serde(rename = "senha", alias = "senhaHash", alias = "password", default)]
    pub password: String,
}

impl UserForm {
    /// Validate the form and hash the password with `cost`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the name is blank, the email is blank or
    /// malformed, or the password is too short. Returns [Error::HashingError]
    /// if the password could not be hashed.
    pub fn validate(self, cost: u32) -> Result<NewUser, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::Validation("O nome é obrigatório".to_owned()));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(Error::Validation("O e-mail é obrigatório".to_owned()));
        }
        if !EmailAddress::is_valid(email) {
            return Err(Error::Validation(format!("E-mail inválido: {email}")));
        }

        let password = ValidatedPassword::new(&self.password)?;

        Ok(NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash: PasswordHash::new(password, cost)?,
        })
    }
}

/// The JSON body for logging in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    /// The email the user registered with.
    #[serde(default)]
    pub email: String,
    /// The raw password.
    #[serde(rename = "senha", alias = "password", default)]
    pub password: String,
}

/// The minimal view of a user returned after logging in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The user's ID.
    pub id: DatabaseId,
    /// The user's display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// The user's email address.
    pub email: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl CreateTable for User {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS usuario (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl Record for User {
    type Fields = NewUser;

    const TABLE: &'static str = "usuario";
    const COLUMNS: &'static [&'static str] = &["name", "email", "password"];

    fn from_fields(id: DatabaseId, fields: Self::Fields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            password_hash: fields.password_hash,
        }
    }

    fn to_params(fields: &Self::Fields) -> Vec<&dyn ToSql> {
        vec![&fields.name, &fields.email, &fields.password_hash]
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        let id = row.get(0)?;
        let name = row.get(1)?;
        let email = row.get(2)?;
        let raw_password_hash: String = row.get(3)?;

        Ok(Self {
            id,
            name,
            email,
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}
