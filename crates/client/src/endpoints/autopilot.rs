//! Windows Autopilot device identities

use intune_domain::{AutopilotImport, Result};
use serde::Serialize;
use serde_json::Value;

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};

const IDENTITIES_BASE: &str = "/deviceManagement/windowsAutopilotDeviceIdentities";
const IMPORT_PATH: &str = "/deviceManagement/importedWindowsAutopilotDeviceIdentities/import";

const IMPORTED_IDENTITY_TYPE: &str = "#microsoft.graph.importedWindowsAutopilotDeviceIdentity";

/// Wire payload for the import action. The endpoint expects every key to be
/// present, explicit `null` for anything unknown, so no field is ever
/// skipped during serialization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportedIdentity<'a> {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    order_identifier: Option<&'a str>,
    serial_number: Option<&'a str>,
    product_key: Option<&'a str>,
    hardware_identifier: Option<&'a str>,
    assigned_user_principal_name: Option<&'a str>,
}

/// Proxy for Autopilot device registration and inventory.
#[derive(Clone)]
pub struct Autopilot {
    identities: Collection,
}

impl Autopilot {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { identities: Collection::new(client, IDENTITIES_BASE) }
    }

    pub async fn list_devices(&self) -> Result<Vec<Value>> {
        self.identities.list().await
    }

    pub async fn get_device(&self, device_id: &str) -> Result<Value> {
        self.identities.get(device_id).await
    }

    /// Register a device with the Autopilot service.
    pub async fn import_device(&self, upload: &AutopilotImport) -> Result<Value> {
        let body = ImportedIdentity {
            odata_type: IMPORTED_IDENTITY_TYPE,
            order_identifier: upload.group_tag.as_deref(),
            serial_number: upload.serial_number.as_deref(),
            product_key: upload.product_key.as_deref(),
            hardware_identifier: upload.hardware_identifier.as_deref(),
            assigned_user_principal_name: upload.assigned_user.as_deref(),
        };
        let body = serde_json::to_value(&body).map_err(|e| {
            intune_domain::IntuneError::Decode(format!("failed to serialize import: {e}"))
        })?;
        self.identities.client().send(&GraphRequest::post(IMPORT_PATH, body)).await
    }
}
