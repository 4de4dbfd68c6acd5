//! Defines the route handlers for creating, reading, updating and deleting users.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    json::{AppJson, AppPath},
    user::{
        core::{User, UserForm},
        service::UserService,
    },
};

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

/// A route handler for registering a new user, responds with 201 and the stored user.
pub async fn create_user_endpoint(
    State(users): State<UserService>,
    AppJson(form): AppJson<UserForm>,
) -> Result<(StatusCode, AppJson<User>), Error> {
    let user = users.create(form).inspect_err(|error| {
        tracing::debug!("Could not create user: {error}");
    })?;

    Ok((StatusCode::CREATED, AppJson(user)))
}

/// A route handler for listing all users.
pub async fn get_users_endpoint(
    State(users): State<UserService>,
) -> Result<AppJson<Vec<User>>, Error> {
    users.get_all().map(AppJson)
}

/// A route handler for getting a user by their database ID.
pub async fn get_user_endpoint(
    State(users): State<UserService>,
    AppPath(user_id): AppPath<DatabaseId>,
) -> Result<AppJson<User>, Error> {
    users.get(user_id).map(AppJson)
}

/// A route handler for overwriting a user.
pub async fn update_user_endpoint(
    State(users): State<UserService>,
    AppPath(user_id): AppPath<DatabaseId>,
    AppJson(form): AppJson<UserForm>,
) -> Result<AppJson<User>, Error> {
    users.update(user_id, form).map(AppJson)
}

/// A route handler for deleting a user, responds with 204 and no body.
pub async fn delete_user_endpoint(
    State(users): State<UserService>,
    AppPath(user_id): AppPath<DatabaseId>,
) -> Result<StatusCode, Error> {
    users.delete(user_id)?;

    Ok(StatusCode::NO_CONTENT)
}
