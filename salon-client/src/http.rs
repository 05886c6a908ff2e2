//! HTTP client for the hosted backend's table API

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::AuthSession;
use crate::query::{Filter, Query};
use crate::{ClientConfig, ClientError, ClientResult};

/// Error body returned by the backend. The table, storage and auth
/// services each use a slightly different shape, so every field is optional.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    fn message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
    }

    fn code(&self) -> Option<String> {
        self.error_code.clone().or_else(|| {
            self.code.as_ref().map(|c| match c {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
    }
}

/// Handle to the hosted backend: tables, object storage and auth
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    config: ClientConfig,
    session: AuthSession,
}

impl RestClient {
    /// Create a client with a fresh, signed-out session
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            http,
            config,
            session: AuthSession::new(),
        })
    }

    /// Share an existing session object
    pub fn with_session(mut self, session: AuthSession) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    fn table_url(&self, table: &str) -> String {
        self.url(&format!("rest/v1/{table}"))
    }

    /// Attach the API key and the bearer token (session token when signed
    /// in, public key otherwise)
    pub(crate) async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .session
            .access_token()
            .await
            .unwrap_or_else(|| self.config.api_key.clone());

        request
            .header("apikey", &self.config.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    // ========== Table API ==========

    /// Read rows
    pub async fn select<T: DeserializeOwned>(&self, table: &str, query: &Query) -> ClientResult<Vec<T>> {
        tracing::debug!(table, ?query, "select");
        let request = self.http.get(self.table_url(table)).query(&query.to_pairs());
        let response = self.authorize(request).await.send().await?;
        Self::handle_response(response).await
    }

    /// Insert one row, returning what the backend stored
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> ClientResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, "insert");
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.authorize(request).await.send().await?;
        Self::handle_response(response).await
    }

    /// Patch the rows matching `filter`
    pub async fn update<B, T>(&self, table: &str, filter: &Filter, body: &B) -> ClientResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::require_filter(table, filter)?;
        tracing::debug!(table, ?filter, "update");
        let request = self
            .http
            .patch(self.table_url(table))
            .query(&filter.to_pairs())
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.authorize(request).await.send().await?;
        Self::handle_response(response).await
    }

    /// Delete the rows matching `filter`
    pub async fn delete(&self, table: &str, filter: &Filter) -> ClientResult<()> {
        Self::require_filter(table, filter)?;
        tracing::debug!(table, ?filter, "delete");
        let request = self
            .http
            .delete(self.table_url(table))
            .query(&filter.to_pairs())
            .header("Prefer", "return=minimal");
        let response = self.authorize(request).await.send().await?;
        Self::handle_empty(response).await
    }

    /// Insert, or merge into the row that collides on `on_conflict`
    pub async fn upsert<B, T>(&self, table: &str, body: &B, on_conflict: &str) -> ClientResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, on_conflict, "upsert");
        let request = self
            .http
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(body);
        let response = self.authorize(request).await.send().await?;
        Self::handle_response(response).await
    }

    fn require_filter(table: &str, filter: &Filter) -> ClientResult<()> {
        if filter.is_empty() {
            return Err(ClientError::internal(format!(
                "refusing to write every row of '{table}' without a filter"
            )));
        }
        Ok(())
    }

    // ========== Response handling ==========

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, text));
        }
        Ok(response.json().await?)
    }

    pub(crate) async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_from(status, text));
        }
        Ok(())
    }

    fn error_from(status: StatusCode, text: String) -> ClientError {
        // Prefer the backend error body when it carries a message
        if let Ok(body) = serde_json::from_str::<ErrorBody>(&text)
            && let Some(message) = body.message()
        {
            return ClientError::Api {
                status: status.as_u16(),
                code: body.code(),
                message,
                details: body.details,
            };
        }

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(text),
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            _ => ClientError::Api {
                status: status.as_u16(),
                code: None,
                message: if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                },
                details: None,
            },
        }
    }
}
