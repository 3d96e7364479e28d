//! Shared fixtures for router-level tests
#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use cafe_server::auth::{JwtService, LocalIdentityProvider};
use cafe_server::{Config, KvStore, RedbStore, ServerState, api};

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

/// Full application over an in-memory store
pub fn test_app() -> TestApp {
    test_app_with(Config::for_testing())
}

pub fn test_app_with(config: Config) -> TestApp {
    let store: Arc<dyn KvStore> = Arc::new(RedbStore::open_in_memory().unwrap());
    let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
    let identity = LocalIdentityProvider::new(store.clone(), jwt)
        .with_params(Params::new(Params::MIN_M_COST, 1, 1, None).unwrap());

    let state = ServerState::new(config, store, Arc::new(identity));
    let app = api::build_app(&state).with_state(state.clone());
    TestApp { app, state }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `data` of the success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn code(&self) -> u64 {
        self.body["code"].as_u64().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        self.send(method, uri, token, body.map(|body| body.to_string()))
            .await
    }

    /// Send a raw JSON body, well-formed or not
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Sign up and log in, returning the access token
    pub async fn register(&self, email: &str, role: &str) -> String {
        let signup = self
            .post(
                "/api/auth/signup",
                None,
                json!({"email": email, "password": "secret123", "name": email, "role": role}),
            )
            .await;
        assert_eq!(signup.status, StatusCode::OK, "signup failed: {}", signup.body);

        let login = self
            .post(
                "/api/auth/login",
                None,
                json!({"email": email, "password": "secret123"}),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "login failed: {}", login.body);
        login.data()["access_token"].as_str().unwrap().to_string()
    }

    /// Seed the sample menu and return `(name, id)` pairs
    pub async fn seed_menu(&self) -> Vec<(String, String)> {
        let res = self.post("/api/init-sample-data", None, json!({})).await;
        assert_eq!(res.status, StatusCode::OK);

        let menu = self.get("/api/menu", None).await;
        menu.data()
            .as_array()
            .unwrap()
            .iter()
            .map(|item| {
                (
                    item["name"].as_str().unwrap().to_string(),
                    item["id"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    pub async fn menu_id(&self, name: &str) -> String {
        let menu = self.get("/api/menu", None).await;
        menu.data()
            .as_array()
            .unwrap()
            .iter()
            .find(|item| item["name"] == name)
            .and_then(|item| item["id"].as_str())
            .unwrap()
            .to_string()
    }
}
