//! JSON and path extractors that report rejections as application errors.

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::IntoResponse,
};
use serde::Serialize;

use crate::Error;

/// Like [axum::Json], but a body that cannot be parsed is rejected with
/// [Error::Validation] so the client gets the usual `{ "message": ... }` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

impl<T: Serialize> IntoResponse for AppJson<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

/// Like [axum::extract::Path], but a segment that cannot be parsed, e.g. a
/// non-numeric ID, is rejected with [Error::Validation].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct AppPath<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::json;

    use super::{AppJson, AppPath};

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: i64,
    }

    async fn echo(AppJson(payload): AppJson<Payload>) -> AppJson<i64> {
        AppJson(payload.value)
    }

    async fn double(AppPath(id): AppPath<i64>) -> AppJson<i64> {
        AppJson(id * 2)
    }

    fn get_test_server() -> TestServer {
        let app = Router::new()
            .route("/", post(echo))
            .route("/double/{id}", get(double));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn accepts_valid_json() {
        let server = get_test_server();

        let response = server.post("/").json(&json!({ "value": 42 })).await;

        response.assert_status_ok();
        assert_eq!(response.json::<i64>(), 42);
    }

    #[tokio::test]
    async fn rejects_missing_field_with_message() {
        let server = get_test_server();

        let response = server.post("/").json(&json!({ "other": 42 })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.contains("value")),
            "want message naming the missing field, got {body}"
        );
    }

    #[tokio::test]
    async fn accepts_numeric_path_segment() {
        let server = get_test_server();

        let response = server.get("/double/21").await;

        response.assert_status_ok();
        assert_eq!(response.json::<i64>(), 42);
    }

    #[tokio::test]
    async fn rejects_malformed_path_segment_with_message() {
        let server = get_test_server();

        let response = server.get("/double/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.contains("abc")),
            "want message naming the bad segment, got {body}"
        );
    }
}
