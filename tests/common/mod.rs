//! Shared setup for the integration tests.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use canteen::config::AdminAccount;
use canteen::lifecycle::ensure_admin;
use canteen::model::{MenuItem, NewMenuItem, NewUser, User};
use canteen::server::{self, session::MemorySessionStore, AppState};
use canteen::store::{sql, Store};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "adminpass";

pub async fn pool() -> SqlitePool {
    sql::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database")
}

pub async fn store() -> Store {
    Store::new(pool().await)
}

pub fn app(store: Store) -> Router {
    server::router(AppState::new(
        store,
        MemorySessionStore::new(Duration::from_secs(3600)),
    ))
}

pub async fn seed_admin(store: &Store) -> User {
    let admin = AdminAccount {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };
    ensure_admin(store, &admin).await.expect("Failed to seed admin")
}

pub async fn seed_user(store: &Store, email: &str) -> User {
    store
        .user()
        .create(NewUser::registration(email, "secret1"))
        .await
        .expect("Failed to create user")
}

pub async fn seed_menu_item(store: &Store, name: &str, price: i64) -> MenuItem {
    store
        .menu_item()
        .create(NewMenuItem {
            name: name.to_string(),
            price,
            description: String::new(),
        })
        .await
        .expect("Failed to create menu item")
}

pub async fn count(store: &Store, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(store.pool())
        .await
        .expect("Failed to count rows")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `name=value` part of the session cookie, ready to send back.
    pub fn session_cookie(&self) -> String {
        let set_cookie = self
            .headers
            .get(SET_COOKIE)
            .expect("No Set-Cookie header")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().expect("No error field")
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).unwrap()).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/sessions",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
    response.session_cookie()
}
