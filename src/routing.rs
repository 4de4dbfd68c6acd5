//! Application router configuration.

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    AppState, Error, endpoints,
    ledger::{
        Expense, Income, create_entry_endpoint, delete_entry_endpoint, get_entries_endpoint,
        get_entry_endpoint, update_entry_endpoint,
    },
    log_in::post_log_in,
    user::{
        create_user_endpoint, delete_user_endpoint, get_user_endpoint, get_users_endpoint,
        update_user_endpoint,
    },
};

/// The origin of the web client during development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            endpoints::USERS,
            post(create_user_endpoint).get(get_users_endpoint),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint)
                .put(update_user_endpoint)
                .delete(delete_user_endpoint),
        )
        .route(endpoints::LOG_IN, post(post_log_in));

    let income_routes = Router::new()
        .route(
            endpoints::INCOMES,
            post(create_entry_endpoint::<Income>).get(get_entries_endpoint::<Income>),
        )
        .route(
            endpoints::INCOME,
            get(get_entry_endpoint::<Income>)
                .put(update_entry_endpoint::<Income>)
                .delete(delete_entry_endpoint::<Income>),
        );

    let expense_routes = Router::new()
        .route(
            endpoints::EXPENSES,
            post(create_entry_endpoint::<Expense>).get(get_entries_endpoint::<Expense>),
        )
        .route(
            endpoints::EXPENSE,
            get(get_entry_endpoint::<Expense>)
                .put(update_entry_endpoint::<Expense>)
                .delete(delete_entry_endpoint::<Expense>),
        );

    user_routes
        .merge(income_routes)
        .merge(expense_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Allow the web client at `allowed_origin` to call the API from the browser.
///
/// Requests from any other origin get no `access-control-allow-origin` header.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
