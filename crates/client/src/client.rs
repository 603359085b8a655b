//! Top-level client
//!
//! Owns one authenticator/token-store pair and hands the shared executor to
//! every endpoint proxy. Proxies are cheap to construct; accessors build
//! them on demand.

use std::sync::Arc;

use intune_domain::{ClientConfig, Credentials};

use crate::auth::{Authenticator, TokenStore};
use crate::endpoints::{
    Autopilot, ConfigurationPolicies, CustomRequest, DeviceConfigurations, DeviceHealthScripts,
    DeviceManagementScripts, DeviceShellScripts, Devices, GroupPolicyConfigurations, Groups,
    Intents, MobileApps, Templates, Users,
};
use crate::http::GraphClient;

/// Authenticated entry point to the device-management API.
///
/// ```no_run
/// use intune_client::IntuneClient;
/// use intune_domain::{ClientConfig, Credentials};
///
/// # async fn example() -> intune_domain::Result<()> {
/// let client = IntuneClient::new(ClientConfig::new(
///     "contoso.onmicrosoft.com",
///     Credentials::ClientSecret {
///         client_id: "app-id".into(),
///         client_secret: "secret".into(),
///     },
/// ));
///
/// let devices = client.devices().list().await?;
/// println!("{} managed devices", devices.len());
/// # Ok(())
/// # }
/// ```
pub struct IntuneClient {
    graph: GraphClient,
    store: Arc<TokenStore>,
}

impl IntuneClient {
    /// Build a client from configuration. No network traffic happens until
    /// the first call; the first call triggers token acquisition.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let refresh_seed = match &config.credentials {
            Credentials::RefreshToken { refresh_token, .. } => Some(refresh_token.clone()),
            _ => None,
        };

        let config = Arc::new(config);
        let http = reqwest::Client::new();
        let store = Arc::new(TokenStore::new(refresh_seed));
        let auth =
            Arc::new(Authenticator::new(http.clone(), config.clone(), store.clone()));
        let graph = GraphClient::new(http, config, auth);

        Self { graph, store }
    }

    /// The current refresh token, if the authority issued or rotated one.
    /// Callers persisting tokens across runs read this after work completes.
    pub async fn refresh_token(&self) -> Option<String> {
        self.store.refresh_token().await
    }

    #[must_use]
    pub fn mobile_apps(&self) -> MobileApps {
        MobileApps::new(self.graph.clone())
    }

    #[must_use]
    pub fn devices(&self) -> Devices {
        Devices::new(self.graph.clone())
    }

    #[must_use]
    pub fn autopilot(&self) -> Autopilot {
        Autopilot::new(self.graph.clone())
    }

    #[must_use]
    pub fn device_configurations(&self) -> DeviceConfigurations {
        DeviceConfigurations::new(self.graph.clone())
    }

    #[must_use]
    pub fn configuration_policies(&self) -> ConfigurationPolicies {
        ConfigurationPolicies::new(self.graph.clone())
    }

    #[must_use]
    pub fn group_policy_configurations(&self) -> GroupPolicyConfigurations {
        GroupPolicyConfigurations::new(self.graph.clone())
    }

    #[must_use]
    pub fn device_management_scripts(&self) -> DeviceManagementScripts {
        DeviceManagementScripts::new(self.graph.clone())
    }

    #[must_use]
    pub fn device_shell_scripts(&self) -> DeviceShellScripts {
        DeviceShellScripts::new(self.graph.clone())
    }

    #[must_use]
    pub fn device_health_scripts(&self) -> DeviceHealthScripts {
        DeviceHealthScripts::new(self.graph.clone())
    }

    #[must_use]
    pub fn intents(&self) -> Intents {
        Intents::new(self.graph.clone())
    }

    #[must_use]
    pub fn templates(&self) -> Templates {
        Templates::new(self.graph.clone())
    }

    #[must_use]
    pub fn groups(&self) -> Groups {
        Groups::new(self.graph.clone())
    }

    #[must_use]
    pub fn users(&self) -> Users {
        Users::new(self.graph.clone())
    }

    #[must_use]
    pub fn custom(&self) -> CustomRequest {
        CustomRequest::new(self.graph.clone())
    }
}
