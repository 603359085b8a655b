//! Managed device inventory and remote actions

use intune_domain::{Result, WipeOptions};
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};

const MANAGED_BASE: &str = "/deviceManagement/managedDevices";
const AZURE_AD_BASE: &str = "/devices";

/// Proxy for Intune managed devices and the directory's device objects.
#[derive(Clone)]
pub struct Devices {
    managed: Collection,
    azure_ad: Collection,
}

impl Devices {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self {
            managed: Collection::new(client.clone(), MANAGED_BASE),
            azure_ad: Collection::new(client, AZURE_AD_BASE),
        }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.managed.list().await
    }

    pub async fn get(&self, device_id: &str) -> Result<Value> {
        self.managed.get(device_id).await
    }

    pub async fn update(&self, device_id: &str, update: Value) -> Result<Value> {
        self.managed.update(device_id, update).await
    }

    pub async fn delete(&self, device_id: &str) -> Result<()> {
        self.managed.delete(device_id).await
    }

    /// Azure AD device objects (directory side, not Intune enrollment).
    pub async fn list_azure_ad_devices(&self) -> Result<Vec<Value>> {
        self.azure_ad.list().await
    }

    pub async fn get_azure_ad_device(&self, device_id: &str) -> Result<Value> {
        self.azure_ad.get(device_id).await
    }

    // ------------------------------------------------------------------
    // Remote actions
    // ------------------------------------------------------------------

    pub async fn set_device_name(&self, device_id: &str, device_name: &str) -> Result<()> {
        self.action(device_id, "setDeviceName", json!({ "deviceName": device_name })).await
    }

    pub async fn reboot(&self, device_id: &str) -> Result<()> {
        self.action(device_id, "rebootNow", json!({})).await
    }

    pub async fn retire(&self, device_id: &str) -> Result<()> {
        self.action(device_id, "retire", json!({})).await
    }

    pub async fn shutdown(&self, device_id: &str) -> Result<()> {
        self.action(device_id, "shutDown", json!({})).await
    }

    pub async fn wipe(&self, device_id: &str, options: &WipeOptions) -> Result<()> {
        let body = serde_json::to_value(options).map_err(|e| {
            intune_domain::IntuneError::Decode(format!("failed to serialize wipe options: {e}"))
        })?;
        self.action(device_id, "wipe", body).await
    }

    async fn action(&self, device_id: &str, action: &str, body: Value) -> Result<()> {
        let path = format!("{}/{}", self.managed.item_path(device_id), action);
        self.managed.client().send(&GraphRequest::post(path, body)).await?;
        Ok(())
    }
}
