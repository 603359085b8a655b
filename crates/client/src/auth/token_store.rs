//! In-memory token state
//!
//! Holds the current bearer token and the rotating refresh token for one
//! client instance. Owned by the client and injected into the authenticator
//! and request executor; never a process-wide singleton.

use tokio::sync::RwLock;

/// Thread-safe store for the bearer and refresh tokens.
///
/// The bearer token is absent until the first authenticated call, replaced on
/// every re-authentication, and only ever invalidated by a 401 (expiry is not
/// tracked locally). The refresh token starts as whatever the credentials
/// seeded and is replaced whenever the authority rotates it.
#[derive(Debug, Default)]
pub struct TokenStore {
    bearer: RwLock<Option<String>>,
    refresh: RwLock<Option<String>>,
}

impl TokenStore {
    /// Create a store, optionally seeded with a refresh token from the
    /// configured credentials.
    #[must_use]
    pub fn new(refresh_token: Option<String>) -> Self {
        Self { bearer: RwLock::new(None), refresh: RwLock::new(refresh_token) }
    }

    /// Current cached bearer token, if any.
    pub async fn bearer_token(&self) -> Option<String> {
        self.bearer.read().await.clone()
    }

    /// Replace the cached bearer token.
    pub async fn set_bearer_token(&self, token: String) {
        *self.bearer.write().await = Some(token);
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.refresh.read().await.clone()
    }

    /// Rotate the refresh token. An authority that does not rotate on every
    /// exchange omits the field, in which case the stored token is kept.
    pub async fn rotate_refresh_token(&self, replacement: Option<String>) {
        if let Some(token) = replacement {
            *self.refresh.write().await = Some(token);
        }
    }
}
