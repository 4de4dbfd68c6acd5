//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::database_id::DatabaseId;

/// The message sent to the client for errors that should not be exposed.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno no servidor";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password did not match a registered user.
    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    /// The email used to create or update a user belongs to another user.
    #[error("Email já cadastrado: {0}")]
    DuplicateEmail(String),

    /// A UNIQUE constraint failed.
    ///
    /// Holds the SQLite description of the constraint, e.g.
    /// "UNIQUE constraint failed: usuario.email". Services should replace
    /// this with a more specific error where they can.
    #[error("Valor já cadastrado ({0})")]
    UniqueViolation(String),

    /// A required field was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The requested item does not exist.
    ///
    /// `kind` names the type of item, e.g. "receita".
    #[error("Item não encontrado: {kind} com o ID: {id}")]
    ItemNotFound {
        /// The name of the item type.
        kind: &'static str,
        /// The ID that was looked up.
        id: DatabaseId,
    },

    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("Recurso não encontrado")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A response body produced by a handler could not be read back.
    #[error("could not read the response body: {0}")]
    ResponseBodyError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(desc))
                if sql_error.extended_code == 2067 =>
            {
                Error::UniqueViolation(desc)
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl Error {
    /// Replace [Error::NotFound] with [Error::ItemNotFound] for the item `kind` with `id`.
    ///
    /// Other errors are returned unchanged.
    pub(crate) fn for_item(self, kind: &'static str, id: DatabaseId) -> Self {
        match self {
            Error::NotFound => Error::ItemNotFound { kind, id },
            error => error,
        }
    }

    /// The HTTP status code that the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ItemNotFound { .. } | Error::NotFound => StatusCode::NOT_FOUND,
            Error::DuplicateEmail(_) | Error::UniqueViolation(_) => StatusCode::CONFLICT,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::ResponseBodyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Server errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            INTERNAL_ERROR_MESSAGE.to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
