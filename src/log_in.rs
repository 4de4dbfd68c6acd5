//! Defines the route handler for logging in.

use axum::extract::State;

use crate::{
    Error,
    json::AppJson,
    user::{Credentials, Profile, UserService},
};

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, responds with the user's profile.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred when verifying the password.
pub async fn post_log_in(
    State(users): State<UserService>,
    AppJson(credentials): AppJson<Credentials>,
) -> Result<AppJson<Profile>, Error> {
    users
        .authenticate(&credentials)
        .inspect(|profile| tracing::info!("User {} logged in", profile.id))
        .map(AppJson)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints, user::Profile};

    async fn get_test_server_with_user() -> (TestServer, Value) {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection, 4).expect("Could not create app state.");
        let server =
            TestServer::try_new(build_router(state)).expect("Could not create test server.");

        let user = server
            .post(endpoints::USERS)
            .json(&json!({ "nome": "Ana", "email": "ana@x.com", "senha": "12345678" }))
            .await
            .json::<Value>();

        (server, user)
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let (server, user) = get_test_server_with_user().await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "ana@x.com", "senha": "12345678" }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Profile>(),
            Profile {
                id: user["id"].as_i64().unwrap(),
                name: "Ana".to_owned(),
                email: "ana@x.com".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let (server, _) = get_test_server_with_user().await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "ana@x.com", "senha": "wrongpassword" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "message": "E-mail ou senha inválidos" }));
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let (server, _) = get_test_server_with_user().await;

        server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "bruno@x.com", "senha": "12345678" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
