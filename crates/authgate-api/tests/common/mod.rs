//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use std::sync::Arc;

use authgate_api::{AppState, build_app, build_state, memory_state};
use authgate_auth::{MemoryUserDirectory, TokenStore};
use authgate_core::config::AppConfig;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = memory_state(config).unwrap();
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Router over a caller-supplied token store.
    pub fn with_token_store(store: Arc<dyn TokenStore>) -> Self {
        let state = build_state(
            AppConfig::default(),
            store,
            Arc::new(MemoryUserDirectory::new()),
        )
        .unwrap();
        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
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
        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, bearer).await
    }

    pub async fn register(&self, username: &str, password: &str, role: &str) -> TestResponse {
        self.post(
            "/api/users",
            json!({ "username": username, "password": password, "role": role }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post(
            "/api/auth/login",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Registers and logs in, returning `(accessToken, refreshToken)`.
    pub async fn signed_in(&self, username: &str, role: &str) -> (String, String) {
        let registered = self.register(username, "password1", role).await;
        assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);

        let login = self.login(username, "password1").await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);
        let body = login.json();
        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}
