//! Shared HTTP plumbing for every outbound service call.
//!
//! Model, embedding and weather clients all go through [`HttpClientBase`], so
//! every external request carries the configured timeout.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("service '{service}' requires an API key")]
    MissingApiKey { service: String },
    #[error("failed to build HTTP client for '{service}': {source}")]
    Client {
        service: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("network error calling '{service}': {source}")]
    Network {
        service: String,
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    pub fn network(service: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            service: service.into(),
            source,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            HttpError::MissingApiKey { service } => {
                format!("Service '{service}' needs an API key; check config/.env.")
            }
            HttpError::Client { service, .. } => {
                format!("Could not prepare a connection to '{service}'.")
            }
            HttpError::Network { service, source } => {
                if source.is_connect() {
                    format!("Could not connect to '{service}'.")
                } else if source.is_timeout() {
                    format!("The request to '{service}' timed out.")
                } else if let Some(status) = source.status() {
                    match status {
                        StatusCode::NOT_FOUND => format!("Endpoint of '{service}' was not found."),
                        StatusCode::TOO_MANY_REQUESTS => {
                            format!("'{service}' is rate limiting requests; try again shortly.")
                        }
                        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                            format!("'{service}' is currently unavailable.")
                        }
                        _ => format!("Request to '{service}' failed: {}", status.as_u16()),
                    }
                } else {
                    format!("Network error talking to '{service}'.")
                }
            }
        }
    }
}

/// Resolve an API key from the environment variable named in config.
pub fn resolve_api_key(service: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim)?;
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                service,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        Self::with_user_agent(id, endpoint, api_key, timeout, None)
    }

    pub fn with_user_agent(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, HttpError> {
        let id = id.into();
        let mut builder = Client::builder().timeout(timeout);
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        }
        let http = builder.build().map_err(|source| HttpError::Client {
            service: id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            endpoint: endpoint.into(),
            api_key,
            http,
        })
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with bearer auth
    pub async fn post_with_bearer<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;
        let request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(body);
        self.send(request).await
    }

    /// Post JSON with query param auth (for Gemini)
    pub async fn post_with_query_key<Req, Res>(
        &self,
        url: &str,
        body: &Req,
    ) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;
        let request = self.http.post(url).query(&[("key", api_key)]).json(body);
        self.send(request).await
    }

    /// Post JSON without auth (for local services like Ollama)
    pub async fn post_no_auth<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, HttpError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send(self.http.post(url).json(body)).await
    }

    /// GET with query parameters, no auth (public weather services)
    pub async fn get_json<Q, Res>(&self, url: &str, query: &Q) -> Result<Res, HttpError>
    where
        Q: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.send(self.http.get(url).query(query)).await
    }

    async fn send<Res>(&self, request: reqwest::RequestBuilder) -> Result<Res, HttpError>
    where
        Res: DeserializeOwned,
    {
        request
            .send()
            .await
            .map_err(|e| HttpError::network(&self.id, e))?
            .error_for_status()
            .map_err(|e| HttpError::network(&self.id, e))?
            .json()
            .await
            .map_err(|e| HttpError::network(&self.id, e))
    }

    fn require_api_key(&self) -> Result<&str, HttpError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| HttpError::MissingApiKey {
                service: self.id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        let base = HttpClientBase::new("svc", "https://example.com/", None, Duration::from_secs(1))
            .expect("client");
        assert_eq!(base.build_url("/v1/x"), "https://example.com/v1/x");
        assert_eq!(base.build_url("v1/x"), "https://example.com/v1/x");
    }

    #[test]
    fn blank_key_spec_resolves_to_none() {
        assert_eq!(resolve_api_key("svc", Some("   ")), None);
        assert_eq!(resolve_api_key("svc", None), None);
    }

    #[tokio::test]
    async fn keyed_request_without_key_fails_before_network() {
        let base = HttpClientBase::new("svc", "http://127.0.0.1:9", None, Duration::from_secs(1))
            .expect("client");
        let result: Result<serde_json::Value, _> = base
            .post_with_query_key("http://127.0.0.1:9/x", &serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(HttpError::MissingApiKey { .. })));
    }
}
