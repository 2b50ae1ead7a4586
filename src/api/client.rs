use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::ApiError;

/// The single seam between pages and the network. Everything the client
/// does goes through one of these; tests swap in an in-memory fake.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError>;
}

/// HTTP transport against the library server. The session cookie lives in
/// the reqwest cookie store and rides along opaquely; callers never see it.
/// No retry, no timeout, no backoff: a failed attempt is reported upward
/// immediately.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<ApiClient> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Ok(ApiClient { http, base_url })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!("{} {} failed: {}", method, url, err);
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        info!("{} {} {}", method, url, status);

        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }

        if text.is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(ApiError::Network(format!("unreadable response body: {err}"))),
        }
    }
}

/// Pulls the server's structured error message out of a failure body.
/// Registration failures come back under `password`.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("password"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| body.trim().to_owned()),
        Err(_) => body.trim().to_owned(),
    }
}
