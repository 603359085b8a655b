//! Authenticated request executor
//!
//! One HTTP round trip per call, plus the single 401 recovery: a rejected
//! token triggers exactly one re-authentication and one resend. A second 401
//! propagates, which keeps a persistently misconfigured credential from
//! looping forever.

use std::sync::Arc;

use intune_domain::{ClientConfig, IntuneError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::auth::TokenProvider;

/// A declarative request descriptor: verb, relative path, optional JSON body.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl GraphRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), body: Some(body) }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::PATCH, path: path.into(), body: Some(body) }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::PUT, path: path.into(), body: Some(body) }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::DELETE, path: path.into(), body: None }
    }
}

/// Executor for Graph API calls with credential attachment and 401 recovery.
///
/// Cheap to clone; every endpoint proxy holds one.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    auth: Arc<dyn TokenProvider>,
}

impl GraphClient {
    pub fn new(
        http: reqwest::Client,
        config: Arc<ClientConfig>,
        auth: Arc<dyn TokenProvider>,
    ) -> Self {
        Self { http, config, auth }
    }

    /// The configured Graph base URL (origin + version prefix).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.graph_base_url
    }

    /// Underlying transport, for calls that bypass the Graph host entirely
    /// (the storage upload stage speaks the blob endpoint's own protocol).
    #[must_use]
    pub fn transport(&self) -> &reqwest::Client {
        &self.http
    }

    /// Execute a request and return the parsed JSON body.
    ///
    /// No-content responses (204/205) map to `Value::Null`.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: &GraphRequest) -> Result<Value> {
        let token = self.auth.access_token().await?;
        let mut response = self.execute(request, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(path = %request.path, "access token rejected, re-authenticating once");
            let token = self.auth.refresh_access_token().await?;
            response = self.execute(request, &token).await?;
        }

        let status = response.status();
        debug!(status = status.as_u16(), "received graph response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IntuneError::Api { status: status.as_u16(), body });
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return Ok(Value::Null);
        }

        let text = response
            .text()
            .await
            .map_err(|e| IntuneError::Transport(format!("failed to read response body: {e}")))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| IntuneError::Decode(format!("failed to parse response: {e}")))
    }

    /// Execute a request and deserialize the body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: &GraphRequest) -> Result<T> {
        let value = self.send(request).await?;
        serde_json::from_value(value)
            .map_err(|e| IntuneError::Decode(format!("failed to decode response: {e}")))
    }

    async fn execute(&self, request: &GraphRequest, token: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.graph_base_url, request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .send()
            .await
            .map_err(|e| IntuneError::Transport(format!("request to {url} failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use intune_domain::Credentials;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    /// Counts authentications instead of talking to a token endpoint.
    struct CountingProvider {
        initial: AtomicUsize,
        refreshes: AtomicUsize,
    }

    impl CountingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self { initial: AtomicUsize::new(0), refreshes: AtomicUsize::new(0) })
        }

        fn total_authentications(&self) -> usize {
            self.initial.load(Ordering::SeqCst) + self.refreshes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenProvider for CountingProvider {
        async fn access_token(&self) -> Result<String> {
            self.initial.fetch_add(1, Ordering::SeqCst);
            Ok("token-1".to_string())
        }

        async fn refresh_access_token(&self) -> Result<String> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            Ok("token-2".to_string())
        }
    }

    fn client_for(server: &MockServer, auth: Arc<CountingProvider>) -> GraphClient {
        let config = Arc::new(
            ClientConfig::new("test-tenant", Credentials::Bearer { token: "unused".into() })
                .with_graph_base_url(server.uri()),
        );
        GraphClient::new(reqwest::Client::new(), config, auth)
    }

    #[tokio::test]
    async fn attaches_bearer_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deviceManagement/managedDevices"))
            .and(header("Authorization", "Bearer token-1"))
            .and(header("Content-Type", "application/json"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, CountingProvider::new());
        let body = client
            .send(&GraphRequest::get("/deviceManagement/managedDevices"))
            .await
            .expect("response");
        assert_eq!(body["value"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn recovers_from_a_single_401() {
        let server = MockServer::start().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        Mock::given(method("GET"))
            .and(path("/groups"))
            .respond_with(move |_req: &Request| -> ResponseTemplate {
                if hits_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(401)
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "g1"}))
                }
            })
            .expect(2)
            .mount(&server)
            .await;

        let auth = CountingProvider::new();
        let client = client_for(&server, auth.clone());

        let body = client.send(&GraphRequest::get("/groups")).await.expect("response");
        assert_eq!(body["id"], "g1");
        assert_eq!(auth.total_authentications(), 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].headers.get("Authorization").unwrap(), "Bearer token-2");
    }

    #[tokio::test]
    async fn second_401_propagates_without_a_third_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/groups"))
            .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
            .expect(2)
            .mount(&server)
            .await;

        let auth = CountingProvider::new();
        let client = client_for(&server, auth.clone());

        let err = client.send(&GraphRequest::get("/groups")).await.expect_err("should fail");
        assert!(matches!(err, IntuneError::Api { status: 401, .. }));
        assert_eq!(auth.total_authentications(), 2);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_auth_errors_propagate_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/deviceAppManagement/mobileApps"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let auth = CountingProvider::new();
        let client = client_for(&server, auth.clone());

        let err = client
            .send(&GraphRequest::post(
                "/deviceAppManagement/mobileApps",
                serde_json::json!({}),
            ))
            .await
            .expect_err("should fail");
        match err {
            IntuneError::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad request");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(auth.total_authentications(), 1);
    }

    #[tokio::test]
    async fn no_content_maps_to_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server, CountingProvider::new());
        let body = client.send(&GraphRequest::delete("/groups/g1")).await.expect("response");
        assert!(body.is_null());
    }
}
