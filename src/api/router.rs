//! HTTP router assembly

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/auth", auth::create_auth_router())
        .nest("/users", users::create_users_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::user::{InMemoryUserRepository, Sha256Hasher, UserService};

    fn test_router() -> Router {
        let service = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Sha256Hasher::default()),
        );
        create_router_with_state(AppState::new(Arc::new(service)))
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(router, "POST", uri, Some(body)).await
    }

    fn create_body(email: &str) -> Value {
        json!({ "email": email, "password": "My5up3r5tr0ngP@55w0rd" })
    }

    #[tokio::test]
    async fn test_health() {
        let router = test_router();

        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&router, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "user_store");
    }

    #[tokio::test]
    async fn test_create_then_conflict() {
        let router = test_router();

        let (status, body) = post(&router, "/users", create_body("a@example.com")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "PENDING");
        assert!(body.get("password_hash").is_none());

        let (status, body) = post(&router, "/users", create_body("a@example.com")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["type"], "conflict_error");
    }

    #[tokio::test]
    async fn test_update_email_resets_status() {
        let router = test_router();

        let (_, created) = post(&router, "/users", create_body("b@example.com")).await;
        let id = created["id"].as_str().unwrap().to_string();

        let activate = format!("/users/{id}/activate");
        let (status, activated) = send(&router, "POST", &activate, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(activated["status"], "ACTIVE");

        let (status, updated) = send(
            &router,
            "PATCH",
            &format!("/users/{id}"),
            Some(json!({ "email": "b2@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], "b2@example.com");
        assert_eq!(updated["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let router = test_router();

        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/users/{}", uuid::Uuid::new_v4()),
            Some(json!({ "email": "c@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&router, "GET", "/users/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "id");
    }

    #[tokio::test]
    async fn test_invalid_body_is_json_error() {
        let router = test_router();

        let (status, body) = post(&router, "/users", json!({ "email": "d@example.com" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "json_parse_error");

        let (status, _) = send(
            &router,
            "POST",
            "/users",
            Some(json!({ "email": "d@example.com", "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_list_and_delete() {
        let router = test_router();

        let (_, created) = post(&router, "/users", create_body("e@example.com")).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, _) = post(&router, "/auth/login", create_body("e@example.com")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &router,
            "POST",
            "/auth/login",
            Some(json!({ "email": "e@example.com", "password": "wrong_password" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");

        let (status, list) = send(&router, "GET", "/users?status=PENDING", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["total"], 1);

        let (status, list) = send(&router, "GET", "/users?email=e@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["users"][0]["id"], id.as_str());

        let uri = "/users?email=e@example.com&status=ACTIVE";
        let (_, list) = send(&router, "GET", uri, None).await;
        assert_eq!(list["total"], 0);

        let (status, _) = send(&router, "DELETE", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, "DELETE", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
