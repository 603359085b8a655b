//! Token acquisition against the Azure AD v2.0 token endpoint

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use intune_domain::{ClientConfig, Credentials, IntuneError, Result, GRAPH_DEFAULT_SCOPE};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::token_store::TokenStore;

/// Provides bearer tokens for Graph calls.
///
/// The executor only ever needs two operations: hand me a usable token, and
/// the cached one was just rejected so get me a fresh one. Keeping this a
/// trait lets tests count authentications without a token endpoint.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a bearer token, performing the initial exchange if none is
    /// cached yet.
    async fn access_token(&self) -> Result<String>;

    /// Discard the cached token and acquire a fresh one. Called by the
    /// executor after a 401, exactly once per request.
    async fn refresh_access_token(&self) -> Result<String>;
}

/// Token endpoint reply (RFC 6749 §5.1). Fields this client does not act on
/// are ignored during deserialization.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

/// Exchanges the configured credentials for bearer tokens and keeps the
/// [`TokenStore`] current.
///
/// One instance per client; re-authentication is serialized behind a mutex so
/// concurrent 401s from callers sharing the client collapse into sequential
/// exchanges. A redundant exchange is still possible when two callers race
/// past the cache check, which is harmless: fetching a token is idempotent.
pub struct Authenticator {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    store: Arc<TokenStore>,
    exchange_gate: Mutex<()>,
}

impl Authenticator {
    pub fn new(http: reqwest::Client, config: Arc<ClientConfig>, store: Arc<TokenStore>) -> Self {
        Self { http, config, store, exchange_gate: Mutex::new(()) }
    }

    /// Perform one token exchange and update the store.
    ///
    /// For the pre-supplied bearer variant this is a no-op returning the
    /// static token: there is nothing to exchange, and a rejected static
    /// token is terminal after the executor's single retry.
    async fn authenticate(&self) -> Result<String> {
        let _guard = self.exchange_gate.lock().await;

        let mut form: HashMap<&str, String> = HashMap::new();
        match &self.config.credentials {
            Credentials::Bearer { token } => {
                self.store.set_bearer_token(token.clone()).await;
                return Ok(token.clone());
            }
            Credentials::ClientSecret { client_id, client_secret } => {
                form.insert("client_id", client_id.clone());
                form.insert("client_secret", client_secret.clone());
                form.insert("grant_type", "client_credentials".to_string());
            }
            Credentials::RefreshToken { client_id, client_secret, refresh_token } => {
                // The store holds the newest rotation; the credential value
                // only seeds the very first exchange.
                let current =
                    self.store.refresh_token().await.unwrap_or_else(|| refresh_token.clone());
                form.insert("client_id", client_id.clone());
                form.insert("client_secret", client_secret.clone());
                form.insert("grant_type", "refresh_token".to_string());
                form.insert("refresh_token", current);
            }
        }
        form.insert("scope", GRAPH_DEFAULT_SCOPE.to_string());

        let url = self.config.token_url();
        debug!(%url, grant_type = %form["grant_type"], "requesting access token");

        let response = self.http.post(&url).form(&form).send().await.map_err(|e| {
            IntuneError::Auth { status: None, detail: format!("token request failed: {e}") }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IntuneError::Auth { status: Some(status.as_u16()), detail: body });
        }

        let payload: TokenResponse = response.json().await.map_err(|e| IntuneError::Auth {
            status: None,
            detail: format!("failed to parse token response: {e}"),
        })?;

        self.store.rotate_refresh_token(payload.refresh_token).await;
        self.store.set_bearer_token(payload.access_token.clone()).await;

        info!("access token acquired");
        Ok(payload.access_token)
    }
}

#[async_trait]
impl TokenProvider for Authenticator {
    async fn access_token(&self) -> Result<String> {
        match self.store.bearer_token().await {
            Some(token) => Ok(token),
            None => self.authenticate().await,
        }
    }

    async fn refresh_access_token(&self) -> Result<String> {
        self.authenticate().await
    }
}
