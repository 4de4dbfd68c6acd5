//! Defines the route handlers for incomes and expenses.
//!
//! The handlers are generic over the record type, the router picks the
//! instance, e.g. `create_entry_endpoint::<Income>`.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    json::{AppJson, AppPath},
    ledger::{
        core::{Entry, LedgerRecord},
        service::{ExpenseService, IncomeService, LedgerService},
    },
};

impl FromRef<AppState> for IncomeService {
    fn from_ref(state: &AppState) -> Self {
        state.incomes.clone()
    }
}

impl FromRef<AppState> for ExpenseService {
    fn from_ref(state: &AppState) -> Self {
        state.expenses.clone()
    }
}

/// A route handler for creating an income or expense, responds with 201 and the stored record.
pub async fn create_entry_endpoint<R: LedgerRecord + Serialize>(
    State(service): State<LedgerService<R>>,
    AppJson(entry): AppJson<Entry>,
) -> Result<(StatusCode, AppJson<R>), Error> {
    let record = service.create(entry)?;

    Ok((StatusCode::CREATED, AppJson(record)))
}

/// A route handler for listing every income or expense.
pub async fn get_entries_endpoint<R: LedgerRecord + Serialize>(
    State(service): State<LedgerService<R>>,
) -> Result<AppJson<Vec<R>>, Error> {
    service.get_all().map(AppJson)
}

/// A route handler for getting an income or expense by its database ID.
pub async fn get_entry_endpoint<R: LedgerRecord + Serialize>(
    State(service): State<LedgerService<R>>,
    AppPath(id): AppPath<DatabaseId>,
) -> Result<AppJson<R>, Error> {
    service.get(id).map(AppJson)
}

/// A route handler for replacing an income or expense.
pub async fn update_entry_endpoint<R: LedgerRecord + Serialize>(
    State(service): State<LedgerService<R>>,
    AppPath(id): AppPath<DatabaseId>,
    AppJson(entry): AppJson<Entry>,
) -> Result<AppJson<R>, Error> {
    service.update(id, entry).map(AppJson)
}

/// A route handler for deleting an income or expense, responds with 204 and no body.
pub async fn delete_entry_endpoint<R: LedgerRecord>(
    State(service): State<LedgerService<R>>,
    AppPath(id): AppPath<DatabaseId>,
) -> Result<StatusCode, Error> {
    service.delete(id)?;

    Ok(StatusCode::NO_CONTENT)
}
