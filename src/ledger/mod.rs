//! Incomes ("receitas") and expenses ("despesas").

mod core;
mod endpoints;
mod service;

pub use core::{Entry, Expense, Income};
pub use endpoints::{
    create_entry_endpoint, delete_entry_endpoint, get_entries_endpoint, get_entry_endpoint,
    update_entry_endpoint,
};
pub use service::{ExpenseService, IncomeService};
