#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use helpdesk_api::{
    db::MemoryStore,
    models::{auth::TokenSubject, principal::Role},
    router,
    services::{password::CredentialHasher, token::TokenCodec},
    AppState,
};

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<TokenCodec>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), TokenCodec::new(SECRET), CredentialHasher::new(4));
        let tokens = state.tokens.clone();
        Self {
            router: router(state),
            store,
            tokens,
        }
    }

    /// Signs a token directly, bypassing login.
    pub fn token_for(&self, subject: i64, role: Role) -> String {
        self.tokens
            .issue(&TokenSubject {
                subject,
                name: "Test Principal".into(),
                role,
            })
            .expect("sign token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_vec(&v).expect("encode body")),
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    /// Registers through the API and returns the new id.
    pub async fn register(&self, first_name: &str, email: &str, password: &str, role: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "firstName": first_name,
                    "lastName": "Tester",
                    "email": email,
                    "password": password,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["id"].as_i64().expect("id in register response")
    }

    /// Logs in through the API and returns the token.
    pub async fn login(&self, email: &str, password: &str, role: Option<&str>) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password, "role": role })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token in login response").to_string()
    }
}
