//! Integration tests for API endpoints.
//!
//! The full router runs over real services backed by in-memory stores; the
//! health check pings an in-memory SQLite connection.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{config, InMemoryStore, RecordingNotifier};
use edl_backend::api::{create_router, AppState};
use edl_backend::infra::{Database, NotifierResult};
use edl_backend::services::{Authenticator, PositionManager, Services, UnitManager, UserManager};

struct TestApp {
    router: Router,
    store: InMemoryStore,
    notifier: Arc<RecordingNotifier>,
}

async fn app(environment: &str) -> TestApp {
    let store = InMemoryStore::new();
    let notifier = RecordingNotifier::new(NotifierResult::NotConfigured);
    let uow = Arc::new(store.clone());

    let services = Services::new(
        Arc::new(Authenticator::new(uow.clone(), &config(environment), notifier.clone())),
        Arc::new(UserManager::new(uow.clone())),
        Arc::new(PositionManager::new(uow.clone())),
        Arc::new(UnitManager::new(uow)),
    );

    let connection = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    let database = Arc::new(Database::from_connection(connection));
    let state = AppState::from_container(&services, database);

    TestApp {
        router: create_router(state, &[]),
        store,
        notifier,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = app("production").await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = app("production").await;
    let id = app.store.add_user("admin", "admin123", None);

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["displayName"], "admin Full Name");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = app("production").await;

    let (status, body) = app
        .send(Method::POST, "/auth/login", None, Some(json!({ "username": "admin" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = app("production").await;
    app.store.add_user("admin", "admin123", None);

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_forgot_password_development_echo() {
    let app = app("development").await;
    app.store.add_user("admin", "admin123", Some("admin@example.com"));

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/forgot-password",
            None,
            Some(json!({ "username": "admin" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["resetLink"].as_str().unwrap().contains("token="));
    assert_eq!(app.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_reset_password_policy_feedback() {
    let app = app("production").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/reset-password",
            None,
            Some(json!({ "token": "abc", "newPassword": "weakpass" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PASSWORD_POLICY");
    assert_eq!(body["requirements"]["length"], true);
    assert_eq!(body["requirements"]["lowercase"], true);
    assert_eq!(body["requirements"]["uppercase"], false);
    assert_eq!(body["requirements"]["number"], false);
    assert_eq!(body["requirements"]["special"], false);
}

#[tokio::test]
async fn test_reset_password_through_http() {
    let app = app("production").await;
    app.store.add_user("admin", "admin123", Some("admin@example.com"));

    app.send(
        Method::POST,
        "/auth/forgot-password",
        None,
        Some(json!({ "username": "admin" })),
    )
    .await;
    let token = app.notifier.last_token();

    let body = json!({ "token": token, "newPassword": "NewSecure#2024" });
    let (status, _) = app
        .send(Method::POST, "/auth/reset-password", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::POST, "/auth/reset-password", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RESET_TOKEN");

    app.login("admin", "NewSecure#2024").await;
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = app("production").await;

    for uri in ["/users", "/users/me", "/positions", "/units"] {
        let (status, _) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let (status, _) = app
        .send(Method::GET, "/users", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user() {
    let app = app("production").await;
    let id = app.store.add_user("agomez", "Secure#2024", Some("ana@example.com"));
    let token = app.login("agomez", "Secure#2024").await;

    let (status, body) = app.send(Method::GET, "/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "ana@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_position_and_unit_crud() {
    let app = app("production").await;
    app.store.add_user("admin", "Secure#2024", None);
    let token = app.login("admin", "Secure#2024").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/positions",
            Some(&token),
            Some(json!({ "name": "Profesional Universitario", "grade": "02" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let position_id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            "/units",
            Some(&token),
            Some(json!({ "code": "100", "name": "Despacho" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let unit_id = body["id"].as_i64().unwrap();

    let (_, positions) = app.send(Method::GET, "/positions", Some(&token), None).await;
    assert_eq!(positions[0]["status"], "Activo");
    assert_eq!(positions[0]["executiveLevel"], false);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/units/{}", unit_id),
            Some(&token),
            Some(json!({ "code": "101", "name": "Despacho del Alcalde" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send(Method::DELETE, &format!("/positions/{}", position_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(Method::DELETE, &format!("/positions/{}", position_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_user_crud() {
    let app = app("production").await;
    app.store.add_user("admin", "Secure#2024", None);
    let token = app.login("admin", "Secure#2024").await;

    let (_, unit) = app
        .send(
            Method::POST,
            "/units",
            Some(&token),
            Some(json!({ "code": "100", "name": "Despacho" })),
        )
        .await;

    let new_user = json!({
        "document": "1020304050",
        "fullName": "Ana Gómez",
        "username": "agomez",
        "password": "Ana#Secure1",
        "unitId": unit["id"],
        "hireDate": "2023-02-01"
    });
    let (status, body) = app
        .send(Method::POST, "/users", Some(&token), Some(new_user.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .send(Method::POST, "/users", Some(&token), Some(new_user))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, users) = app.send(Method::GET, "/users", Some(&token), None).await;
    let listed = users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == user_id)
        .unwrap();
    assert_eq!(listed["unit"], "Despacho");
    assert!(listed.get("password").is_none());

    // New user can log in with the hashed password
    app.login("agomez", "Ana#Secure1").await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/users/{}", user_id),
            Some(&token),
            Some(json!({ "fullName": "Ana M. Gómez", "username": "agomez" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    app.login("agomez", "Ana#Secure1").await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", user_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, &format!("/users/{}", user_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app("production").await;

    let (status, body) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/auth/login"].is_object());
    assert!(body["paths"]["/users/{id}"].is_object());
}
