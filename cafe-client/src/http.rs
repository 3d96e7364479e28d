//! HTTP client for the cafe REST API
//!
//! Every endpoint answers with the `ApiResponse` envelope; success payloads
//! are unwrapped from `data`, failures become [`ClientError`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::cart::ClientSession;
use shared::client::{LoginRequest, LoginResponse, SampleDataResult, SignupRequest, UserInfo};
use shared::models::{
    AnalyticsReport, MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery, Order, OrderCreate,
    OrderStatus, OrderStatusUpdate, UserProfile,
};

use crate::{ClientError, ClientResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed cafe API client
#[derive(Debug, Clone)]
pub struct CafeClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl CafeClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Use an access token obtained elsewhere
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forget the stored token (tokens are stateless; nothing to revoke)
    pub fn logout(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and decode the envelope, returning its message and data
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> ClientResult<ApiResponse<T>> {
        let response = self.authorized(req).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            tracing::debug!(status = status.as_u16(), message = %message, "Request failed");
            return Err(ClientError::from_status(status, message));
        }

        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        self.send_envelope(req)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    // ========== Auth ==========

    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<UserInfo> {
        self.post("/api/auth/signup", request).await
    }

    /// Sign in and keep the access token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<ClientSession> {
        let response: LoginResponse = self
            .post("/api/auth/login", &LoginRequest::new(email, password))
            .await?;
        self.token = Some(response.access_token.clone());
        Ok(ClientSession::new(response))
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.get("/api/auth/me").await
    }

    // ========== Menu ==========

    pub async fn list_menu(&self, query: &MenuQuery) -> ClientResult<Vec<MenuItem>> {
        self.send(self.client.get(self.url("/api/menu")).query(query))
            .await
    }

    pub async fn get_menu_item(&self, id: &str) -> ClientResult<MenuItem> {
        self.get(&format!("/api/menu/{id}")).await
    }

    pub async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem> {
        self.post("/api/menu", item).await
    }

    pub async fn update_menu_item(&self, id: &str, update: &MenuItemUpdate) -> ClientResult<MenuItem> {
        self.send(self.client.put(self.url(&format!("/api/menu/{id}"))).json(update))
            .await
    }

    pub async fn delete_menu_item(&self, id: &str) -> ClientResult<()> {
        self.send_envelope::<serde_json::Value>(
            self.client.delete(self.url(&format!("/api/menu/{id}"))),
        )
        .await?;
        Ok(())
    }

    // ========== Orders ==========

    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.post("/api/orders", order).await
    }

    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/orders").await
    }

    pub async fn get_order(&self, id: &str) -> ClientResult<Order> {
        self.get(&format!("/api/orders/{id}")).await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        let body = OrderStatusUpdate {
            status: status.as_str().to_string(),
        };
        self.send(
            self.client
                .patch(self.url(&format!("/api/orders/{id}/status")))
                .json(&body),
        )
        .await
    }

    // ========== Admin & setup ==========

    pub async fn analytics(&self) -> ClientResult<AnalyticsReport> {
        self.get("/api/analytics").await
    }

    pub async fn init_sample_data(&self) -> ClientResult<SampleDataResult> {
        self.send(self.client.post(self.url("/api/init-sample-data")))
            .await
    }
}
