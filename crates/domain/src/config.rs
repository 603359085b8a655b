//! Client configuration and credential types

/// Default Graph API base, including the `beta` version segment.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/beta";

/// Default Azure AD authority host for token acquisition.
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// Scope requested on every token exchange.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Credentials used to obtain bearer tokens for Graph calls.
///
/// Exactly one variant is configured per client instance. The variant itself
/// is immutable; the rotating refresh token and the derived bearer token are
/// held by the client's token store, not in this value.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// App-only authentication via the client-credentials grant.
    ClientSecret { client_id: String, client_secret: String },

    /// Delegated authentication via a previously issued refresh token.
    /// The refresh token seeds the token store and may be rotated by the
    /// authority on each exchange.
    RefreshToken { client_id: String, client_secret: String, refresh_token: String },

    /// A pre-acquired bearer token supplied by the caller. Never refreshed;
    /// a 401 on this variant is retried once with the same token and is then
    /// terminal.
    Bearer { token: String },
}

impl Credentials {
    /// Whether this variant can recover from a rejected token by asking the
    /// authority for a new one.
    #[must_use]
    pub fn is_renewable(&self) -> bool {
        !matches!(self, Self::Bearer { .. })
    }
}

/// Configuration for an Intune client instance.
///
/// The base URLs are overridable so tests can point the client at mock
/// servers; production callers use [`ClientConfig::new`] and never touch
/// them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Azure AD tenant (GUID or verified domain name).
    pub tenant_id: String,
    /// Credential variant used for token acquisition.
    pub credentials: Credentials,
    /// Graph API origin + version prefix.
    pub graph_base_url: String,
    /// Token authority origin.
    pub login_base_url: String,
}

impl ClientConfig {
    /// Create a configuration with the production Graph and login endpoints.
    #[must_use]
    pub fn new(tenant_id: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            credentials,
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            login_base_url: DEFAULT_LOGIN_BASE_URL.to_string(),
        }
    }

    /// Override the Graph API base URL (mock servers, sovereign clouds).
    #[must_use]
    pub fn with_graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Override the token authority base URL.
    #[must_use]
    pub fn with_login_base_url(mut self, url: impl Into<String>) -> Self {
        self.login_base_url = trim_trailing_slash(url.into());
        self
    }

    /// Full token endpoint URL for this tenant.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_base_url, self.tenant_id)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
