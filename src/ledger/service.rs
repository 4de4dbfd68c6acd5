//! The income and expense services.

use crate::{
    Error,
    database_id::DatabaseId,
    db::SQLiteStore,
    ledger::core::{Entry, Expense, Income, LedgerRecord},
};

/// Handles creating, fetching, updating and deleting incomes or expenses.
#[derive(Debug, Clone)]
pub struct LedgerService<R> {
    store: SQLiteStore<R>,
}

/// The service for incomes.
pub type IncomeService = LedgerService<Income>;

/// The service for expenses.
pub type ExpenseService = LedgerService<Expense>;

impl<R: LedgerRecord> LedgerService<R> {
    /// Create a new service backed by `store`.
    pub fn new(store: SQLiteStore<R>) -> Self {
        Self { store }
    }

    /// Store a new record.
    pub fn create(&self, entry: Entry) -> Result<R, Error> {
        self.store.create(entry)
    }

    /// Get the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::ItemNotFound] if there is no such record.
    pub fn get(&self, id: DatabaseId) -> Result<R, Error> {
        self.store.get(id).map_err(|error| error.for_item(R::KIND, id))
    }

    /// Get all records ordered by ID.
    pub fn get_all(&self) -> Result<Vec<R>, Error> {
        self.store.get_all()
    }

    /// Replace every field of the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::ItemNotFound] if there is no such record, in which case nothing is written.
    pub fn update(&self, id: DatabaseId, entry: Entry) -> Result<R, Error> {
        self.store
            .update(id, entry)
            .map_err(|error| error.for_item(R::KIND, id))
    }

    /// Delete the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::ItemNotFound] if there is no such record.
    pub fn delete(&self, id: DatabaseId) -> Result<(), Error> {
        self.store
            .delete(id)
            .map_err(|error| error.for_item(R::KIND, id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::{SQLiteStore, initialize},
        ledger::core::{Entry, Expense, Income},
    };

    use super::{ExpenseService, IncomeService};

    fn get_services() -> (IncomeService, ExpenseService) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            IncomeService::new(SQLiteStore::new(connection.clone())),
            ExpenseService::new(SQLiteStore::new(connection)),
        )
    }

    fn entry(description: &str, amount: f64) -> Entry {
        Entry {
            name: "Teste".to_owned(),
            description: description.to_owned(),
            amount,
            date: date!(2024 - 01 - 01),
            category: "food".to_owned(),
        }
    }

    #[test]
    fn create_then_get_returns_same_record() {
        let (incomes, _) = get_services();

        let income = incomes.create(entry("Salário", 5000.0)).unwrap();

        assert!(income.id > 0);
        assert_eq!(incomes.get(income.id), Ok(income));
    }

    #[test]
    fn incomes_and_expenses_are_stored_separately() {
        let (incomes, expenses) = get_services();

        let income = incomes.create(entry("Salário", 5000.0)).unwrap();
        let expense = expenses.create(entry("Lunch", 12.5)).unwrap();

        assert_eq!(incomes.get_all(), Ok(vec![income]));
        assert_eq!(expenses.get_all(), Ok(vec![expense]));
    }

    #[test]
    fn update_replaces_all_fields() {
        let (_, expenses) = get_services();
        let expense = expenses.create(entry("Lunch", 12.5)).unwrap();
        let new_entry = Entry {
            name: "Jantar".to_owned(),
            description: "Dinner".to_owned(),
            amount: 30.0,
            date: date!(2024 - 02 - 03),
            category: "restaurant".to_owned(),
        };

        let updated = expenses.update(expense.id, new_entry.clone()).unwrap();

        assert_eq!(
            updated,
            Expense {
                id: expense.id,
                entry: new_entry
            }
        );
        assert_eq!(expenses.get(expense.id), Ok(updated));
    }

    #[test]
    fn update_fails_with_non_existent_id() {
        let (incomes, _) = get_services();

        let result = incomes.update(42, entry("Salário", 5000.0));

        assert_eq!(
            result,
            Err(Error::ItemNotFound {
                kind: "receita",
                id: 42
            })
        );
        assert_eq!(incomes.get_all(), Ok(vec![]));
    }

    #[test]
    fn delete_then_get_fails() {
        let (_, expenses) = get_services();
        let expense = expenses.create(entry("Lunch", 12.5)).unwrap();

        expenses.delete(expense.id).unwrap();

        assert_eq!(
            expenses.get(expense.id),
            Err(Error::ItemNotFound {
                kind: "despesa",
                id: expense.id
            })
        );
    }

    #[test]
    fn get_all_after_creates_and_deletes() {
        let (incomes, _) = get_services();
        let created: Vec<Income> = (0..4)
            .map(|i| incomes.create(entry("Salário", f64::from(i))).unwrap())
            .collect();

        incomes.delete(created[0].id).unwrap();

        assert_eq!(incomes.get_all(), Ok(created[1..].to_vec()));
    }
}
