//! The paths of the REST API.
//!
//! Paths with an ID segment use axum's `{name}` capture syntax.

/// Register a user (POST) or list all users (GET).
pub const USERS: &str = "/api/usuarios";
/// Get, replace or delete the user with the given ID.
pub const USER: &str = "/api/usuarios/{user_id}";
/// Check an email and password pair.
pub const LOG_IN: &str = "/api/auth/login";
/// Record an income (POST) or list all incomes (GET).
pub const INCOMES: &str = "/api/receita";
/// Get, replace or delete the income with the given ID.
pub const INCOME: &str = "/api/receita/{income_id}";
/// Record an expense (POST) or list all expenses (GET).
pub const EXPENSES: &str = "/api/despesa";
/// Get, replace or delete the expense with the given ID.
pub const EXPENSE: &str = "/api/despesa/{expense_id}";
