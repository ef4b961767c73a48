//! Authenticated REST client for the admin surface.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use vitrine_common::config::ApiConfig;
use vitrine_common::models::{ContactSubmission, LoginRequest, Record, ResourceKind, TokenResponse, User};

use crate::error::{ClientError, Result};
use crate::query::ListQuery;
use crate::response;
use crate::token::TokenStore;
use crate::upload::{FormBody, Upload};

/// Media sub-resource updated through its own multipart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Image,
    Images,
    Video,
}

impl MediaSlot {
    fn suffix(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Images => "images",
            Self::Video => "video",
        }
    }
}

enum Body {
    Empty,
    Json(Value),
    Multipart(FormBody),
}

/// Async client for the protected admin endpoints.
///
/// Every call reads the bearer token from the [`TokenStore`] at send time.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use vitrine_client::{ApiClient, FileTokenStore};
///
/// #[tokio::main]
/// async fn main() -> vitrine_client::Result<()> {
///     let store = Arc::new(FileTokenStore::new("./.vitrine/session.json"));
///     let api = ApiClient::new("http://localhost:8000", store, None)?;
///     let me = api.me().await?;
///     println!("signed in as {}", me.username);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build().map_err(ClientError::Http)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            tokens,
        })
    }

    pub fn from_config(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::new(config.base_url(), tokens, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Token lifecycle ───────────────────────────────────────────────────────

    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.tokens.save(token)?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<()> {
        self.tokens.clear()?;
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&ListQuery>,
        body: Body,
        authorize: bool,
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %path, "api request");

        let mut req = self.client.request(method, &url);
        if let Some(q) = query {
            req = req.query(q);
        }
        if authorize {
            if let Some(token) = self.tokens.load() {
                req = req.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }
        req = match body {
            Body::Empty => req,
            Body::Json(v) => req.json(&v),
            Body::Multipart(form) => req.multipart(form.into_form()),
        };

        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::from_send(&self.base_url, e))?;
        response::decode(resp).await
    }

    async fn expect<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<T> {
        self.request(method, path, None, body, true)
            .await?
            .ok_or_else(|| ClientError::Decode(format!("empty response from {path}")))
    }

    fn json<B: Serialize>(body: &B) -> Result<Body> {
        serde_json::to_value(body)
            .map(Body::Json)
            .map_err(|e| ClientError::validation(e.to_string()))
    }

    // ── Auth ──────────────────────────────────────────────────────────────────

    /// Exchange credentials for a token and persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let body = Self::json(&LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        })?;
        let token: TokenResponse = self
            .request(Method::POST, "/api/auth/login/json", None, body, false)
            .await?
            .ok_or_else(|| ClientError::Decode("empty login response".into()))?;
        self.set_token(&token.access_token)?;
        tracing::info!(%username, "logged in");
        Ok(token)
    }

    /// The "who am I" check.
    pub async fn me(&self) -> Result<User> {
        self.expect(Method::GET, "/api/auth/me", Body::Empty).await
    }

    // ── Generic resource operations ───────────────────────────────────────────

    pub async fn list<R: Record>(&self, query: &ListQuery) -> Result<Vec<R>> {
        Ok(self
            .request(Method::GET, R::KIND.path(), Some(query), Body::Empty, true)
            .await?
            .unwrap_or_default())
    }

    pub async fn get<R: Record>(&self, id: i64) -> Result<R> {
        self.expect(Method::GET, &R::KIND.item_path(id), Body::Empty).await
    }

    pub async fn create_json<R: Record, B: Serialize>(&self, body: &B) -> Result<R> {
        self.expect(Method::POST, R::KIND.path(), Self::json(body)?).await
    }

    pub async fn create_multipart<R: Record>(&self, form: FormBody) -> Result<R> {
        self.expect(Method::POST, R::KIND.path(), Body::Multipart(form)).await
    }

    /// Metadata update (`PUT /api/{resource}/{id}` with a JSON body).
    pub async fn update<R: Record, B: Serialize>(&self, id: i64, body: &B) -> Result<R> {
        self.expect(Method::PUT, &R::KIND.item_path(id), Self::json(body)?).await
    }

    /// Media update (`PUT /api/{resource}/{id}/{image|images|video}`, multipart).
    pub async fn update_media<R: Record>(&self, id: i64, slot: MediaSlot, form: FormBody) -> Result<R> {
        let path = format!("{}/{}", R::KIND.item_path(id), slot.suffix());
        self.expect(Method::PUT, &path, Body::Multipart(form)).await
    }

    pub async fn delete<R: Record>(&self, id: i64) -> Result<()> {
        self.delete_kind(R::KIND, id).await
    }

    /// Delete by runtime kind, for callers that only know the collection name.
    pub async fn delete_kind(&self, kind: ResourceKind, id: i64) -> Result<()> {
        self.request::<Value>(Method::DELETE, &kind.item_path(id), None, Body::Empty, true)
            .await?;
        Ok(())
    }

    /// Raw JSON listing by runtime kind.
    pub async fn list_kind(&self, kind: ResourceKind, query: &ListQuery) -> Result<Vec<Value>> {
        Ok(self
            .request(Method::GET, kind.path(), Some(query), Body::Empty, true)
            .await?
            .unwrap_or_default())
    }

    /// Raw JSON record by runtime kind.
    pub async fn get_kind(&self, kind: ResourceKind, id: i64) -> Result<Value> {
        self.expect(Method::GET, &kind.item_path(id), Body::Empty).await
    }

    // ── Resource-specific helpers ─────────────────────────────────────────────

    /// Store gallery images ahead of a service create/update; returns their keys.
    pub async fn upload_service_images(&self, images: Vec<Upload>) -> Result<Vec<String>> {
        let mut form = FormBody::new();
        for image in images {
            form = form.file("images", image)?;
        }
        if form.field_names().is_empty() {
            return Ok(Vec::new());
        }
        let path = format!("{}/upload-images", ResourceKind::Services.path());
        Ok(self
            .request(Method::POST, &path, None, Body::Multipart(form), true)
            .await?
            .unwrap_or_default())
    }

    pub async fn mark_submission_read(&self, id: i64) -> Result<ContactSubmission> {
        let path = format!("{}/read", ResourceKind::ContactSubmissions.item_path(id));
        self.expect(Method::PUT, &path, Body::Json(serde_json::json!({}))).await
    }
}
